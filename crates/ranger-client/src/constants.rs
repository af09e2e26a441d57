// Ranger public v2 API paths

pub mod api_path {
    // Policy
    pub const POLICY: &str = "/service/public/v2/api/policy";

    // Service
    pub const SERVICE: &str = "/service/public/v2/api/service";

    /// Path addressing a single policy by its numeric id
    pub fn policy_by_id(id: i64) -> String {
        format!("{}/{}", POLICY, id)
    }
}
