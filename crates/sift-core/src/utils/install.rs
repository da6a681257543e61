//! Install command snippets for the common JavaScript package managers.

use serde::Serialize;
use std::fmt;

/// Package managers a detail page offers install commands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    fn install_verb(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            _ => "add",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ready-to-copy install command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallCommand {
    pub manager: PackageManager,
    pub command: String,
}

/// Install commands for `package_name`, one per package manager
pub fn install_commands(package_name: &str) -> Vec<InstallCommand> {
    PackageManager::ALL
        .iter()
        .map(|&manager| InstallCommand {
            manager,
            command: format!("{} {} {}", manager.label(), manager.install_verb(), package_name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_commands() {
        let commands = install_commands("@types/node");
        let rendered: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();

        assert_eq!(
            rendered,
            vec![
                "npm install @types/node",
                "yarn add @types/node",
                "pnpm add @types/node",
                "bun add @types/node",
            ]
        );
    }
}
