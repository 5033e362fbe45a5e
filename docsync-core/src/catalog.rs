//! File-backed booster catalog.
//!
//! The catalog is a YAML list; entry order is kept because fork order follows it.
//!
//! ```yaml
//! - mission: rest-http
//!   repository: acme/rest-http-vertx
//!   name: Vert.x REST
//! ```

use std::path::Path;

use crate::error::{io_err, CoreError};
use crate::types::{Booster, MissionId};

/// Load every booster from `path`.
pub fn load(path: &Path) -> Result<Vec<Booster>, CoreError> {
    if !path.exists() {
        return Err(CoreError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(vec![]);
    }
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Boosters bound to `mission`, in catalog order.
pub fn for_mission<'a>(boosters: &'a [Booster], mission: &MissionId) -> Vec<&'a Booster> {
    boosters.iter().filter(|b| &b.mission_id == mission).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_keeps_catalog_order() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("boosters.yaml");
        std::fs::write(
            &path,
            "- mission: crud\n  repository: acme/crud-spring\n\
             - mission: rest-http\n  repository: acme/rest-http-vertx\n  name: Vert.x\n",
        )
        .unwrap();

        let boosters = load(&path).expect("load");
        assert_eq!(boosters.len(), 2);
        assert_eq!(boosters[0].repository.full_name(), "acme/crud-spring");
        assert_eq!(boosters[1].name.as_deref(), Some("Vert.x"));
    }

    #[test]
    fn load_rejects_bad_repository() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("boosters.yaml");
        std::fs::write(&path, "- mission: crud\n  repository: not-a-repo\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn for_mission_filters_stably() {
        let mk = |m: &str, r: &str| Booster {
            mission_id: MissionId::from(m),
            repository: r.parse().unwrap(),
            name: None,
        };
        let all = vec![mk("a", "o/1"), mk("b", "o/2"), mk("a", "o/3")];
        let picked = for_mission(&all, &MissionId::from("a"));
        let names: Vec<_> = picked.iter().map(|b| b.repository.name()).collect();
        assert_eq!(names, ["1", "3"]);
    }
}
