/// `User-Agent` header identifying this client to the endpoint.
pub fn get_user_agent(app_id: &str) -> String {
    format!("{}/{}", app_id, env!("CARGO_PKG_VERSION"))
}
