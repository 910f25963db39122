use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchesFile {
    pub branches: Vec<Branch>,
}

impl BranchesFile {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }
}

/// The two Indore shops, used when no branches file is configured.
#[must_use]
pub fn default_branches() -> BranchesFile {
    BranchesFile {
        branches: vec![
            Branch {
                id: "branch-54".to_string(),
                name: "The Barber Shop 54".to_string(),
                address: "DF 62, Scheme No 54, Vijay Nagar, Indore".to_string(),
            },
            Branch {
                id: "branch-114".to_string(),
                name: "The Barber Shop 114".to_string(),
                address: "Plot no 43, near Mahindra Showroom, Scheme No 114, Indore".to_string(),
            },
        ],
    }
}

/// Load and validate the branches reference data from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_branches(path: &Path) -> Result<BranchesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BranchesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let branches_file: BranchesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::BranchesFileParse)?;

    validate_branches(&branches_file)?;

    Ok(branches_file)
}

fn validate_branches(file: &BranchesFile) -> Result<(), ConfigError> {
    if file.branches.is_empty() {
        return Err(ConfigError::BranchValidation(
            "at least one branch is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for branch in &file.branches {
        if branch.id.trim().is_empty() {
            return Err(ConfigError::BranchValidation(format!(
                "branch '{}' has an empty id",
                branch.name
            )));
        }
        if branch.name.trim().is_empty() || branch.address.trim().is_empty() {
            return Err(ConfigError::BranchValidation(format!(
                "branch '{}' needs both a name and an address",
                branch.id
            )));
        }
        if !seen.insert(branch.id.as_str()) {
            return Err(ConfigError::BranchValidation(format!(
                "duplicate branch id '{}'",
                branch.id
            )));
        }
    }

    Ok(())
}
