mod error {
    pub use astrarc::error::*;
}

mod databases {
    pub use astrarc::api::databases::*;
}

mod locator {
    pub use astrarc::api::locator::*;
}

mod models {
    pub use astrarc::api::models::*;
}

pub use astrarc::api::DatabaseDirectory;

mod client_under_test {
    #![allow(dead_code)]

    include!("../src/api/client.rs");

    #[test]
    fn defaults_to_devops_base_url() {
        let client = DevopsClient::new();
        let url = client
            .endpoint_url(databases::list_endpoint())
            .expect("url should build");
        assert_eq!(url.as_str(), "https://api.astra.datastax.com/v2/databases");
    }

    #[test]
    fn database_without_optional_info_fields_still_maps() {
        let resource: DatabaseResource =
            serde_json::from_str(r#"{"id":"d1","info":{"name":"bare"}}"#).expect("deserialize");
        let view = resource.into_view();
        assert_eq!(view.name, "bare");
        assert_eq!(view.region, "");
        assert_eq!(view.status, None);
    }

    #[test]
    fn joins_multiple_error_descriptions() {
        let message = parse_api_error_message(
            r#"{"errors":[{"description":"first","ID":1},{"description":"second"}]}"#,
        );
        assert_eq!(message.as_deref(), Some("first (id=1), second"));
    }

    #[test]
    fn ignores_non_envelope_bodies() {
        assert_eq!(parse_api_error_message("<html>oops</html>"), None);
    }
}
