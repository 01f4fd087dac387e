//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use catalog_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::DuplicateConstraint => StatusError::bad_request()
            .brief("Product title, slug or image url is already in use"),
        ProductsServiceError::InvalidPrice(source) => {
            StatusError::bad_request().brief(format!("Invalid price: {source}"))
        }
        ProductsServiceError::Sql(source) => {
            error!("products storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            into_status_error(ProductsServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            into_status_error(ProductsServiceError::DuplicateConstraint).code,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn out_of_range_price_is_a_bad_request() {
        let status = i64::try_from(u64::MAX)
            .map_err(ProductsServiceError::from)
            .map_err(into_status_error);

        assert_eq!(
            status.err().map(|status| status.code),
            Some(StatusCode::BAD_REQUEST)
        );
    }
}
