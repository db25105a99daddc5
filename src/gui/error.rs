use thiserror::Error;

use super::controller::MenuId;

/// Error returned by a host-supplied menu action
///
/// The menu system never inspects or swallows these; they travel back to the
/// caller of [`MenuController::handle_event`](super::MenuController::handle_event).
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type of every bound action
pub type ActionResult = Result<(), ActionError>;

/// Invalid widget or menu construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Options and selectors need visible text
    #[error("widget label must not be empty")]
    EmptyLabel,

    #[error("selector '{label}' has no choices")]
    EmptyChoices { label: String },

    #[error("selector '{label}' default index {index} is out of range ({len} choices)")]
    DefaultOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },

    #[error("menu '{menu}' has no widget at index {index}")]
    NoSuchWidget { menu: String, index: usize },
}

/// Rejected menu stack operation; the stack is left untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// `Back` on a menu that was not opened from another menu
    #[error("menu '{title}' has no parent to go back to")]
    NoParent { title: String },

    #[error("no menu registered with id {0}")]
    UnknownMenu(MenuId),

    /// Entering a menu that is already on the stack would make the parent chain cycle
    #[error("menu '{title}' is already open")]
    AlreadyOpen { title: String },

    #[error("menu '{title}' is not on the stack")]
    NotOnStack { title: String },
}

/// Any failure surfaced by the menu controller
#[derive(Debug, Error)]
pub enum MenuError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("menu action failed: {0}")]
    Action(#[source] ActionError),
}

impl MenuError {
    /// True when a host callback failed, as opposed to a menu-system rejection
    pub fn is_action(&self) -> bool {
        matches!(self, MenuError::Action(_))
    }
}

impl From<MenuError> for String {
    fn from(error: MenuError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = ConfigError::DefaultOutOfRange {
            label: "Change bgcolor".to_string(),
            index: 7,
            len: 4,
        };
        assert_eq!(
            error.to_string(),
            "selector 'Change bgcolor' default index 7 is out of range (4 choices)"
        );

        let error = NavigationError::NoParent {
            title: "Main Menu".to_string(),
        };
        assert_eq!(error.to_string(), "menu 'Main Menu' has no parent to go back to");
    }

    #[test]
    fn test_action_error_keeps_source() {
        use std::error::Error as _;

        let error = MenuError::Action("disk on fire".into());
        assert!(error.is_action());
        assert_eq!(error.to_string(), "menu action failed: disk on fire");
        assert_eq!(error.source().map(|s| s.to_string()), Some("disk on fire".to_string()));

        let message: String = MenuError::from(ConfigError::EmptyLabel).into();
        assert_eq!(message, "widget label must not be empty");
    }
}
