//! Overlay Menu System
//!
//! Screen-space menus drawn on top of the host scene and driven by keyboard
//! input.
//!
//! # Architecture
//!
//! - [`Widget`] - one row: option, selector or text line
//! - [`Menu`] - ordered widgets, focus cursor, close behaviour, style
//! - [`MenuController`] - owns all menus and the stack of open ones, routes input
//!
//! Input flows host loop -> [`EventRouter`](crate::EventRouter) ->
//! [`MenuController`] (top of the stack) -> [`Menu`] -> [`Widget`]. Widgets hand
//! stack changes back up as an [`Effect`] so push/pop lives in one place.
//!
//! # Example Usage
//!
//! ```
//! use overlay_menu::{Menu, MenuController, MenuInput, Response, SystemCommand};
//!
//! let mut help: Menu<()> = Menu::new("Help").with_on_close(SystemCommand::DisableClose);
//! help.add_option("Return to Menu", SystemCommand::Back).unwrap();
//!
//! let mut controller = MenuController::new(Menu::new("Main Menu"));
//! let help = controller.add_menu(help);
//! controller.menu_mut(controller.root()).unwrap().add_option("Help", help).unwrap();
//! controller.enable();
//!
//! let response = controller.handle_event(MenuInput::Accept, &mut ()).unwrap();
//! assert_eq!(response, Response::Consumed);
//! assert_eq!(controller.top(), help);
//! ```

pub mod controller;
pub mod error;
pub mod menu;
pub mod params;
pub mod widget;

pub use controller::{BatchOutcome, MenuController, MenuId, Response};
pub use error::{ActionError, ActionResult, ConfigError, MenuError, NavigationError};
pub use menu::{Background, FocusDirection, Menu, MenuStyle, TextAlign};
pub use params::{ParamValue, Params};
pub use widget::{
    Action, Callback, Choice, Effect, Invocation, SelectDirection, Selection, SystemCommand, Widget,
    WidgetKind, callback,
};
