//! CMDB endpoint paths

use serde::Serialize;
use std::fmt;

const CMDB_PREFIX: &str = "/api/v2/cmdb";

/// `/api/v2/cmdb/<category>/<object>` endpoint of one configuration table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CmdbPath {
    pub category: &'static str,
    pub object: &'static str,
}

impl CmdbPath {
    pub const fn new(category: &'static str, object: &'static str) -> Self {
        Self { category, object }
    }

    /// Path of the table itself (POST target, singleton GET/PUT target)
    pub fn collection(&self) -> String {
        format!("{}/{}/{}", CMDB_PREFIX, self.category, self.object)
    }

    /// Path of one entry, mkey percent-encoded
    pub fn item(&self, mkey: &str) -> String {
        format!("{}/{}", self.collection(), urlencoding::encode(mkey))
    }
}

impl fmt::Display for CmdbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        let path = CmdbPath::new("firewall.service", "custom");
        assert_eq!(path.collection(), "/api/v2/cmdb/firewall.service/custom");
    }

    #[test]
    fn test_item_path_encodes_mkey() {
        let path = CmdbPath::new("system.replacemsg", "http");
        assert_eq!(
            path.item("url block/2"),
            "/api/v2/cmdb/system.replacemsg/http/url%20block%2F2"
        );
    }
}
