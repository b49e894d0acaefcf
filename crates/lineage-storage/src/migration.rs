//! Schema migrations for Lineage storage backends
//!
//! Provides version tracking and migration functions for schema changes.

use crate::StorageResult;

/// Current schema version
pub const CURRENT_VERSION: u32 = 1;

/// Migration trait for storage backends
pub trait Migratable {
    /// Get the current schema version from storage
    fn get_schema_version(&self) -> StorageResult<u32>;

    /// Set the schema version in storage
    fn set_schema_version(&self, version: u32) -> StorageResult<()>;

    /// Run migrations from current version to target version
    fn migrate_to(&self, target_version: u32) -> StorageResult<()> {
        let current = self.get_schema_version()?;

        if current == target_version {
            tracing::debug!("Schema already at version {}", target_version);
            return Ok(());
        }

        if current > target_version {
            tracing::warn!(
                "Schema version {} is newer than target {}. Downgrades not supported.",
                current,
                target_version
            );
            return Ok(());
        }

        tracing::info!("Migrating schema from v{} to v{}", current, target_version);

        for version in (current + 1)..=target_version {
            self.run_migration(version)?;
            self.set_schema_version(version)?;
            tracing::info!("Migrated to schema version {}", version);
        }

        Ok(())
    }

    /// Run a specific migration
    fn run_migration(&self, version: u32) -> StorageResult<()>;

    /// Migrate to the latest version
    fn migrate_to_latest(&self) -> StorageResult<()> {
        self.migrate_to(CURRENT_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeStore {
        version: RefCell<u32>,
        ran: RefCell<Vec<u32>>,
    }

    impl FakeStore {
        fn at(version: u32) -> Self {
            Self {
                version: RefCell::new(version),
                ran: RefCell::new(Vec::new()),
            }
        }
    }

    impl Migratable for FakeStore {
        fn get_schema_version(&self) -> StorageResult<u32> {
            Ok(*self.version.borrow())
        }

        fn set_schema_version(&self, version: u32) -> StorageResult<()> {
            *self.version.borrow_mut() = version;
            Ok(())
        }

        fn run_migration(&self, version: u32) -> StorageResult<()> {
            self.ran.borrow_mut().push(version);
            Ok(())
        }
    }

    #[test]
    fn test_migrate_fresh_store_to_latest() {
        let store = FakeStore::at(0);
        store.migrate_to_latest().unwrap();

        assert_eq!(*store.version.borrow(), CURRENT_VERSION);
        assert_eq!(*store.ran.borrow(), (1..=CURRENT_VERSION).collect::<Vec<_>>());
    }

    #[test]
    fn test_migrate_is_noop_when_current() {
        let store = FakeStore::at(CURRENT_VERSION);
        store.migrate_to_latest().unwrap();
        assert!(store.ran.borrow().is_empty());
    }

    #[test]
    fn test_downgrade_refused_without_error() {
        let store = FakeStore::at(CURRENT_VERSION + 1);
        store.migrate_to_latest().unwrap();

        assert!(store.ran.borrow().is_empty());
        assert_eq!(*store.version.borrow(), CURRENT_VERSION + 1);
    }
}
