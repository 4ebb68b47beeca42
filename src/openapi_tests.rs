#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        // Test that the OpenAPI schema can be generated without errors
        let openapi = ApiDoc::openapi();

        // Verify that the schema contains the expected components
        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("IntradayView"));
        assert!(components.schemas.contains_key("DailyView"));
        assert!(components.schemas.contains_key("DailyFilters"));

        // Verify that the schema can be serialized to JSON without errors
        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        // Verify ErrorResponse has the expected structure
        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) =
            error_response_schema
        {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_openapi_paths_contain_dashboard_endpoints() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi
            .paths
            .paths
            .contains_key("/api/v1/intraday/companies"));
        assert!(openapi
            .paths
            .paths
            .contains_key("/api/v1/intraday/companies/{company}/view"));
        assert!(openapi.paths.paths.contains_key("/api/v1/daily/filters"));
        assert!(openapi.paths.paths.contains_key("/api/v1/daily/view"));
    }

    #[test]
    fn test_company_view_responses_cover_error_taxonomy() {
        let openapi = ApiDoc::openapi();

        let path = openapi
            .paths
            .paths
            .get("/api/v1/intraday/companies/{company}/view")
            .unwrap();
        let get_op = path
            .operations
            .get(&utoipa::openapi::PathItemType::Get)
            .unwrap();

        let responses = &get_op.responses;
        assert!(responses.responses.contains_key("200"));
        assert!(responses.responses.contains_key("400"));
        assert!(responses.responses.contains_key("404"));
        assert!(responses.responses.contains_key("422"));
    }
}
