const LIST_LIMIT: u32 = 100;

pub fn list_endpoint() -> &'static str {
    "/v2/databases"
}

pub fn database_endpoint(id: &str) -> String {
    format!("/v2/databases/{id}")
}

pub fn current_org_endpoint() -> &'static str {
    "/v2/currentOrg"
}

pub fn non_terminated_query() -> Vec<(String, String)> {
    vec![
        ("include".to_string(), "nonterminated".to_string()),
        ("provider".to_string(), "ALL".to_string()),
        ("limit".to_string(), LIST_LIMIT.to_string()),
    ]
}
