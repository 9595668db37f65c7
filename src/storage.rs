//! Persistence adapter and startup hydration.
//!
//! Stores are persisted as whole-collection JSON payloads in named slots.
//! Hydration runs once at startup: each slot is loaded if present, seed
//! data is kept otherwise, and a readiness signal flips from
//! `Uninitialized` to `Ready` exactly once. After that every mutation
//! writes its store's collections back, fire-and-forget.

use std::{error::Error, fmt::Display, fs, io::ErrorKind, path::PathBuf, sync::Arc};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task;

use crate::expense::{Expense, ExpenseStore};
use crate::project::{Project, ProjectStore, Task, TeamMember, TimeEntry};

/// Slot holding the expense collection.
pub const EXPENSE_SLOT: &str = "expense-storage";
/// Slot holding the four project-domain collections.
pub const PROJECT_SLOT: &str = "project-storage";

/// A named durable slot per store. Implementations only move payload
/// strings; what goes into a slot is decided here.
pub trait Storage: Send + Sync {
    /// Returns the payload stored under `slot`, or `None` when the slot
    /// has never been written.
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the payload stored under `slot`.
    fn save(&self, slot: &str, payload: &str) -> Result<(), StorageError>;
}

#[derive(Debug)]
pub struct StorageError {
    pub slot: String,
    pub source: std::io::Error,
}
impl Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "storage slot `{}`: {}", self.slot, self.source)
    }
}
impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Slot storage backed by one `<slot>.json` file per slot in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStorage {
    dir: PathBuf,
}
impl JsonDirStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}
impl Storage for JsonDirStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError {
                slot: slot.to_string(),
                source: err,
            }),
        }
    }

    fn save(&self, slot: &str, payload: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(self.slot_path(slot), payload))
            .map_err(|err| StorageError {
                slot: slot.to_string(),
                source: err,
            })
    }
}

/// Startup lifecycle of the workspace. There is no intermediate state:
/// consumers either see the pre-hydration substitutes (empty lists,
/// zeroed summaries) or fully loaded stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    Uninitialized,
    Ready,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExpenseSlot {
    expenses: Vec<Expense>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectSlot {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    time_entries: Vec<TimeEntry>,
    team_members: Vec<TeamMember>,
}

/// Both stores plus the readiness signal, owned by the composition root
/// and passed to consumers by reference.
pub struct Workspace {
    pub expenses: ExpenseStore,
    pub projects: ProjectStore,
    readiness: watch::Sender<Readiness>,
}
impl Workspace {
    pub fn readiness(&self) -> Readiness {
        *self.readiness.borrow()
    }

    /// A receiver for consumers that render a loading state until the
    /// workspace is ready.
    pub fn subscribe_readiness(&self) -> watch::Receiver<Readiness> {
        self.readiness.subscribe()
    }
}

/// One-shot startup loader: performs the transition from seed data to
/// stored data and flips the readiness signal.
pub struct Hydrator {
    storage: Arc<dyn Storage>,
    readiness: watch::Sender<Readiness>,
}
impl Hydrator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (readiness, _) = watch::channel(Readiness::Uninitialized);
        Self { storage, readiness }
    }

    /// Subscribe before calling [`Hydrator::run`] to observe the flip.
    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.readiness.subscribe()
    }

    /// Loads both slots, falling back to the seed datasets when a slot is
    /// missing, unreadable or corrupt, wires up write-back persistence,
    /// and flips readiness. This is the only asynchronous boundary in the
    /// system; everything after it is synchronous.
    pub async fn run(self) -> Workspace {
        let Self { storage, readiness } = self;

        let loader = Arc::clone(&storage);
        let slots =
            task::spawn_blocking(move || (loader.load(EXPENSE_SLOT), loader.load(PROJECT_SLOT)))
                .await;
        let (expense_slot, project_slot) = match slots {
            Ok(slots) => slots,
            Err(err) => {
                warn!("hydration load task failed: {err}");
                (Ok(None), Ok(None))
            }
        };

        let mut expenses = restore_expenses(expense_slot);
        let mut projects = restore_projects(project_slot);

        let sink = Arc::clone(&storage);
        expenses.set_persist_hook(move |store| persist_expenses(sink.as_ref(), store));
        let sink = Arc::clone(&storage);
        projects.set_persist_hook(move |store| persist_projects(sink.as_ref(), store));

        // send_replace updates the value even when nobody subscribed.
        readiness.send_replace(Readiness::Ready);
        info!("workspace hydrated");

        Workspace {
            expenses,
            projects,
            readiness,
        }
    }
}

fn restore_expenses(slot: Result<Option<String>, StorageError>) -> ExpenseStore {
    let payload = match slot {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!("no {EXPENSE_SLOT} slot, starting from seed data");
            return ExpenseStore::seeded();
        }
        Err(err) => {
            warn!("failed to read {EXPENSE_SLOT} ({err}), starting from seed data");
            return ExpenseStore::seeded();
        }
    };
    match serde_json::from_str::<ExpenseSlot>(&payload) {
        Ok(slot) => match ExpenseStore::new(slot.expenses) {
            Ok(store) => store,
            Err(err) => {
                warn!("{EXPENSE_SLOT} is inconsistent ({err}), starting from seed data");
                ExpenseStore::seeded()
            }
        },
        Err(err) => {
            warn!("{EXPENSE_SLOT} is corrupt ({err}), starting from seed data");
            ExpenseStore::seeded()
        }
    }
}

fn restore_projects(slot: Result<Option<String>, StorageError>) -> ProjectStore {
    let payload = match slot {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!("no {PROJECT_SLOT} slot, starting from seed data");
            return ProjectStore::seeded();
        }
        Err(err) => {
            warn!("failed to read {PROJECT_SLOT} ({err}), starting from seed data");
            return ProjectStore::seeded();
        }
    };
    match serde_json::from_str::<ProjectSlot>(&payload) {
        Ok(slot) => match ProjectStore::new(
            slot.projects,
            slot.tasks,
            slot.time_entries,
            slot.team_members,
        ) {
            Ok(store) => store,
            Err(err) => {
                warn!("{PROJECT_SLOT} is inconsistent ({err}), starting from seed data");
                ProjectStore::seeded()
            }
        },
        Err(err) => {
            warn!("{PROJECT_SLOT} is corrupt ({err}), starting from seed data");
            ProjectStore::seeded()
        }
    }
}

fn persist_expenses(storage: &dyn Storage, store: &ExpenseStore) {
    let slot = ExpenseSlot {
        expenses: store.expenses().to_vec(),
    };
    match serde_json::to_string(&slot) {
        Ok(payload) => {
            if let Err(err) = storage.save(EXPENSE_SLOT, &payload) {
                warn!("failed to persist {EXPENSE_SLOT}: {err}");
            }
        }
        Err(err) => warn!("failed to serialize {EXPENSE_SLOT}: {err}"),
    }
}

fn persist_projects(storage: &dyn Storage, store: &ProjectStore) {
    let slot = ProjectSlot {
        projects: store.projects().to_vec(),
        tasks: store.tasks().to_vec(),
        time_entries: store.time_entries().to_vec(),
        team_members: store.team_members().to_vec(),
    };
    match serde_json::to_string(&slot) {
        Ok(payload) => {
            if let Err(err) = storage.save(PROJECT_SLOT, &payload) {
                warn!("failed to persist {PROJECT_SLOT}: {err}");
            }
        }
        Err(err) => warn!("failed to serialize {PROJECT_SLOT}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        ExpenseCategory, ExpenseId, ExpenseStatus, Hydrator, JsonDirStorage, NewExpense,
        ProjectId, Readiness, Storage, EXPENSE_SLOT, PROJECT_SLOT,
    };

    fn expense_input() -> NewExpense {
        NewExpense {
            amount: 19.99,
            category: ExpenseCategory::SoftwareAndSubscriptions,
            description: "IDE license".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            employee: "Dana Lee".to_string(),
            status: ExpenseStatus::Pending,
        }
    }

    #[test]
    fn json_dir_storage_roundtrips_slots() {
        let dir = tempdir().unwrap();
        let storage = JsonDirStorage::new(dir.path());

        assert!(storage.load("expense-storage").unwrap().is_none());
        storage.save("expense-storage", "{\"expenses\":[]}").unwrap();
        assert_eq!(
            storage.load("expense-storage").unwrap().as_deref(),
            Some("{\"expenses\":[]}")
        );
    }

    #[tokio::test]
    async fn hydrate_starts_from_seed_when_slots_are_missing() {
        let dir = tempdir().unwrap();
        let workspace = Hydrator::new(Arc::new(JsonDirStorage::new(dir.path())))
            .run()
            .await;

        assert_eq!(workspace.expenses.expenses().len(), 3);
        assert_eq!(workspace.projects.projects().len(), 2);
        assert_eq!(workspace.projects.team_members().len(), 3);
    }

    #[tokio::test]
    async fn hydrate_falls_back_to_seed_on_corrupt_payload() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(format!("{EXPENSE_SLOT}.json")), "not json").unwrap();

        let workspace = Hydrator::new(Arc::new(JsonDirStorage::new(dir.path())))
            .run()
            .await;

        assert_eq!(workspace.expenses.expenses().len(), 3);
    }

    #[tokio::test]
    async fn mutations_persist_and_survive_rehydration() {
        let dir = tempdir().unwrap();
        let storage: Arc<JsonDirStorage> = Arc::new(JsonDirStorage::new(dir.path()));

        let mut workspace = Hydrator::new(storage.clone()).run().await;
        let added = workspace.expenses.add_expense(expense_input());
        assert!(workspace.projects.delete_project(ProjectId::new(1)));

        // Both slots were written with full collections.
        let expense_payload = storage.load(EXPENSE_SLOT).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&expense_payload).unwrap();
        assert_eq!(value["expenses"].as_array().unwrap().len(), 4);
        let project_payload = storage.load(PROJECT_SLOT).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&project_payload).unwrap();
        assert_eq!(value["projects"].as_array().unwrap().len(), 1);
        assert_eq!(value["team_members"].as_array().unwrap().len(), 3);
        drop(workspace);

        let mut workspace = Hydrator::new(storage).run().await;
        assert_eq!(workspace.expenses.expenses().len(), 4);
        assert_eq!(workspace.expenses.expenses()[0].id, added);
        assert_eq!(workspace.projects.projects().len(), 1);
        assert!(workspace.projects.time_entries().is_empty());

        // Id generation continues above the persisted maximum.
        let next = workspace.expenses.add_expense(expense_input());
        assert_eq!(next, ExpenseId::new(5));
    }

    #[tokio::test]
    async fn readiness_flips_once_hydration_completes() {
        let dir = tempdir().unwrap();
        let hydrator = Hydrator::new(Arc::new(JsonDirStorage::new(dir.path())));
        let receiver = hydrator.subscribe();
        assert_eq!(*receiver.borrow(), Readiness::Uninitialized);

        let workspace = hydrator.run().await;
        assert_eq!(*receiver.borrow(), Readiness::Ready);
        assert_eq!(workspace.readiness(), Readiness::Ready);
    }
}
