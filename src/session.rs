//! Application state persisted in browser local storage.
//!
//! Theme and staff session are read once at startup into [`AppState`]. Every
//! change goes through [`AppState::apply`], which writes the affected key back.

use crate::api::deserialize_opt_id;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const THEME_KEY: &str = "theme";
pub const STAFF_USER_KEY: &str = "ekklesia_staff_user";

/// Minimal string key-value store, implemented over `localStorage` in the
/// browser and over a map in tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; every operation is a silent no-op when storage is
/// unavailable (private mode, sandboxed iframe).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = local_storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            warn!("Could not persist '{}'", key);
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = local_storage() else {
            return;
        };
        if storage.remove_item(key).is_err() {
            warn!("Could not remove '{}'", key);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}'", other)),
        }
    }
}

/// Operational screen a staff member lands on after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workspace {
    Checkpoint,
    PointOfSale,
    Orders,
    Dashboard,
}

/// Logged-in staff member as returned by `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl StaffUser {
    pub fn is_admin(&self) -> bool {
        self.role.trim().eq_ignore_ascii_case("admin")
    }

    pub fn workspace(&self) -> Workspace {
        match self.department.trim().to_lowercase().as_str() {
            "checkin" | "check-in" | "recepcao" | "recepção" | "credenciamento" => {
                Workspace::Checkpoint
            }
            "loja" | "lanchonete" | "vendas" | "pdv" => Workspace::PointOfSale,
            "financeiro" | "pedidos" => Workspace::Orders,
            _ => Workspace::Dashboard,
        }
    }

    /// Admins may open every screen; other staff only their own workspace.
    pub fn may_access(&self, workspace: Workspace) -> bool {
        self.is_admin() || self.workspace() == workspace
    }
}

#[derive(Debug, Clone)]
pub enum AppAction {
    SetTheme(Theme),
    ToggleTheme,
    Login(StaffUser),
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub theme: Theme,
    pub staff: Option<StaffUser>,
}

impl AppState {
    /// Reads theme and session once. Unreadable values count as absent.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or_default();

        let staff = store
            .get(STAFF_USER_KEY)
            .and_then(|raw| match serde_json::from_str::<StaffUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Discarding stored session: {}", e);
                    None
                }
            });

        Self { theme, staff }
    }

    pub fn is_authenticated(&self) -> bool {
        self.staff.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.staff.as_ref().and_then(|s| s.token.clone())
    }

    /// Returns the next state and persists whatever changed.
    pub fn apply(&self, action: AppAction, store: &impl KeyValueStore) -> Self {
        let mut next = self.clone();
        match action {
            AppAction::SetTheme(theme) => {
                next.theme = theme;
                store.set(THEME_KEY, theme.as_str());
            }
            AppAction::ToggleTheme => {
                next.theme = self.theme.toggled();
                store.set(THEME_KEY, next.theme.as_str());
            }
            AppAction::Login(user) => {
                match serde_json::to_string(&user) {
                    Ok(raw) => store.set(STAFF_USER_KEY, &raw),
                    Err(e) => warn!("Could not serialize session: {}", e),
                }
                info!("Staff logged in ({} / {})", user.role, user.department);
                next.staff = Some(user);
            }
            AppAction::Logout => {
                store.remove(STAFF_USER_KEY);
                info!("Staff logged out");
                next.staff = None;
            }
        }
        next
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    fn staff(role: &str, department: &str) -> StaffUser {
        StaffUser {
            id: Some("7".into()),
            name: "Marta".into(),
            email: None,
            role: role.into(),
            department: department.into(),
            token: Some("abc".into()),
        }
    }

    #[test]
    fn empty_storage_loads_defaults() {
        let state = AppState::load(&MemoryStore::default());
        assert_eq!(state.theme, Theme::Light);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn corrupt_session_is_treated_as_logged_out() {
        let store = MemoryStore::default();
        store.set(STAFF_USER_KEY, "{not json");
        store.set(THEME_KEY, "dark");
        let state = AppState::load(&store);
        assert_eq!(state.theme, Theme::Dark);
        assert!(state.staff.is_none());

        store.set(STAFF_USER_KEY, r#"{"name":"no role"}"#);
        assert!(AppState::load(&store).staff.is_none());
    }

    #[test]
    fn unknown_theme_falls_back_to_light() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "sepia");
        assert_eq!(AppState::load(&store).theme, Theme::Light);
    }

    #[test]
    fn session_accepts_numeric_id() {
        let store = MemoryStore::default();
        store.set(
            STAFF_USER_KEY,
            r#"{"id":42,"name":"João","role":"staff","department":"loja"}"#,
        );
        let user = AppState::load(&store).staff.unwrap();
        assert_eq!(user.id.as_deref(), Some("42"));
        assert_eq!(user.workspace(), Workspace::PointOfSale);
    }

    #[test]
    fn actions_persist_changes() {
        let store = MemoryStore::default();
        let state = AppState::load(&store);

        let state = state.apply(AppAction::ToggleTheme, &store);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        let state = state.apply(AppAction::Login(staff("staff", "checkin")), &store);
        assert_eq!(state.token().as_deref(), Some("abc"));
        assert_eq!(AppState::load(&store), state);

        let state = state.apply(AppAction::Logout, &store);
        assert!(state.staff.is_none());
        assert!(store.get(STAFF_USER_KEY).is_none());
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    /// Store whose removals fail, like a locked-down `localStorage`.
    struct StickyStore(MemoryStore);

    impl KeyValueStore for StickyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) {
            self.0.set(key, value);
        }
        fn remove(&self, _key: &str) {}
    }

    #[test]
    fn logout_clears_session_even_if_storage_keeps_it() {
        let store = StickyStore(MemoryStore::default());
        let state = AppState::load(&store).apply(AppAction::Login(staff("admin", "")), &store);

        let state = state.apply(AppAction::Logout, &store);
        assert!(state.staff.is_none());
        assert!(store.get(STAFF_USER_KEY).is_some());
    }

    #[test]
    fn department_selects_workspace() {
        assert_eq!(staff("staff", "Recepção").workspace(), Workspace::Checkpoint);
        assert_eq!(staff("staff", " lanchonete ").workspace(), Workspace::PointOfSale);
        assert_eq!(staff("staff", "financeiro").workspace(), Workspace::Orders);
        assert_eq!(staff("staff", "louvor").workspace(), Workspace::Dashboard);

        let cashier = staff("staff", "loja");
        assert!(cashier.may_access(Workspace::PointOfSale));
        assert!(!cashier.may_access(Workspace::Dashboard));
        assert!(staff("Admin", "loja").may_access(Workspace::Dashboard));
    }
}
