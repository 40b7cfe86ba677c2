use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::clients::list_clients,
        api::clients::get_client,
        api::clients::create_client,
        api::clients::update_client,
        api::clients::delete_client,
        api::autos::list_autos,
        api::autos::get_auto,
        api::autos::create_auto,
        api::autos::update_auto,
        api::autos::delete_auto,
        api::orders::list_orders,
        api::orders::get_order,
        api::orders::create_order,
        api::orders::delete_order,
        api::orders::add_entry,
        api::orders::remove_entry,
        api::orders::complete_order,
        api::sales::list_sales,
        api::sales::get_sales_statistics,
        api::sales::get_sale_report,
        api::tables::dump_tables,
    ),
    tags(
        (name = "autosalon", description = "Dealership orders and sales API")
    )
)]
pub struct ApiDoc;
