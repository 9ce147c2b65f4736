//! Per-technology generators and the default registry wiring.

pub mod auth;
pub mod database;
pub mod frameworks;
pub mod ui;

use precast_core::application::GeneratorRegistry;

use self::{
    auth::{BetterAuthGenerator, ClerkGenerator, NextAuthGenerator},
    database::{
        DrizzleGenerator, MongooseGenerator, PrismaGenerator, RawDriverGenerator, TypeOrmGenerator,
    },
    frameworks::AppScaffold,
    ui::{DaisyUiGenerator, MuiGenerator, ShadcnGenerator},
};

/// The registry used by the CLI: every generator this crate ships.
pub fn default_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();

    for scaffold in AppScaffold::all() {
        registry.register_framework(Box::new(scaffold));
    }

    registry.register_database(Box::new(PrismaGenerator));
    registry.register_database(Box::new(DrizzleGenerator));
    registry.register_database(Box::new(TypeOrmGenerator));
    registry.register_database(Box::new(MongooseGenerator));
    registry.register_database(Box::new(RawDriverGenerator));

    registry.register_auth(Box::new(BetterAuthGenerator));
    registry.register_auth(Box::new(NextAuthGenerator));
    registry.register_auth(Box::new(ClerkGenerator));

    registry.register_ui_library(Box::new(ShadcnGenerator));
    registry.register_ui_library(Box::new(DaisyUiGenerator));
    registry.register_ui_library(Box::new(MuiGenerator));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use precast_core::domain::catalog::{self, Axis};

    #[test]
    fn registry_covers_every_catalog_framework() {
        let registry = default_registry();
        for option in catalog::options(Axis::Framework) {
            assert!(
                registry.framework(option.id).is_some(),
                "no scaffold registered for framework '{}'",
                option.id
            );
        }
    }

    #[test]
    fn registry_covers_every_catalog_orm() {
        let registry = default_registry();
        for option in catalog::options(Axis::Orm) {
            assert!(
                registry.database(option.id).is_some(),
                "no database generator registered for orm '{}'",
                option.id
            );
        }
    }

    #[test]
    fn unknown_ids_miss_cleanly() {
        let registry = default_registry();
        assert!(registry.framework("ember").is_none());
        assert!(registry.auth("okta").is_none());
        assert!(registry.ui_library("bootstrap").is_none());
    }
}
