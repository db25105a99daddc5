//! Menu Controller
//!
//! Owns every menu of the overlay and the stack of currently open ones. The
//! root menu is always `stack[0]`; the top of the stack is the only menu that
//! receives input. Each input is routed to exactly one menu, in arrival order,
//! and every stack change is a single push or pop so a failing callback never
//! leaves the stack half-updated.

use std::fmt;

use tracing::{debug, warn};

use super::error::{MenuError, NavigationError};
use super::menu::{FocusDirection, Menu};
use super::widget::{Effect, SelectDirection, SystemCommand};
use crate::input_system::MenuInput;
use crate::surface::Surface;

/// Handle to a menu owned by a [`MenuController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(usize);

impl MenuId {
    /// The menu passed to [`MenuController::new`]
    pub const ROOT: MenuId = MenuId(0);

    pub(crate) const fn from_index(index: usize) -> Self {
        MenuId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the host should do after an input was handled
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The menu system used the input
    Consumed,
    /// The controller is disabled; the input belongs to the host
    PassThrough,
    /// Terminate the host
    Exit,
}

/// Result of [`MenuController::handle_batch`] for one frame of inputs
#[must_use]
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// An input asked the host to terminate; inputs after it were not handled
    pub exit: bool,
    /// Inputs the disabled controller handed back, in arrival order
    pub passed_through: Vec<MenuInput>,
    /// Failures of individual inputs; the rest of the batch still ran
    pub errors: Vec<MenuError>,
}

/// Menu stack and input routing
///
/// `C` is the host context handed to every bound callback, so actions can
/// mutate application state without globals.
pub struct MenuController<C> {
    menus: Vec<Menu<C>>,
    stack: Vec<MenuId>,
    enabled: bool,
}

impl<C> MenuController<C> {
    /// Creates a disabled controller whose stack holds only `root`
    pub fn new(root: Menu<C>) -> Self {
        MenuController {
            menus: vec![root],
            stack: vec![MenuId::ROOT],
            enabled: false,
        }
    }

    /// Registers a menu that options can later open as a sub-menu
    pub fn add_menu(&mut self, menu: Menu<C>) -> MenuId {
        self.menus.push(menu);
        MenuId(self.menus.len() - 1)
    }

    pub fn root(&self) -> MenuId {
        MenuId::ROOT
    }

    pub fn menu(&self, id: MenuId) -> Result<&Menu<C>, NavigationError> {
        self.menus.get(id.0).ok_or(NavigationError::UnknownMenu(id))
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Result<&mut Menu<C>, NavigationError> {
        self.menus.get_mut(id.0).ok_or(NavigationError::UnknownMenu(id))
    }

    /// Show the overlay and start routing input to it
    pub fn enable(&mut self) {
        debug_assert_eq!(self.stack.first(), Some(&MenuId::ROOT), "root menu left the stack");
        if !self.enabled {
            debug!(menu = %self.active_menu().title(), "menu enabled");
        }
        self.enabled = true;
    }

    /// Hide the overlay; the stack is kept for the next `enable`
    pub fn disable(&mut self) {
        if self.enabled {
            debug!("menu disabled");
        }
        self.enabled = false;
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True while an enabled overlay shows a menu that suspends the host
    pub fn pauses_host(&self) -> bool {
        self.enabled && self.active_menu().pauses_host()
    }

    /// Menu currently receiving input
    pub fn top(&self) -> MenuId {
        *self.stack.last().unwrap_or(&MenuId::ROOT)
    }

    pub fn active_menu(&self) -> &Menu<C> {
        &self.menus[self.top().0]
    }

    pub fn active_menu_mut(&mut self) -> &mut Menu<C> {
        let top = self.top();
        &mut self.menus[top.0]
    }

    pub fn stack(&self) -> &[MenuId] {
        &self.stack
    }

    /// Number of open menus above the root
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    fn title_of(&self, id: MenuId) -> String {
        self.menus
            .get(id.0)
            .map(|menu| menu.title().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// Opens `id` on top of the current menu
    pub fn push_sub_menu(&mut self, id: MenuId) -> Result<(), NavigationError> {
        if id.0 >= self.menus.len() {
            return Err(NavigationError::UnknownMenu(id));
        }
        if self.stack.contains(&id) {
            return Err(NavigationError::AlreadyOpen {
                title: self.title_of(id),
            });
        }

        let parent = self.top();
        self.menus[id.0].set_parent(Some(parent));
        self.stack.push(id);
        debug!(menu = %self.menus[id.0].title(), depth = self.depth(), "entered sub-menu");
        Ok(())
    }

    /// Pops every menu above `id`, leaving `id` on top
    pub fn pop_to(&mut self, id: MenuId) -> Result<(), NavigationError> {
        if !self.stack.contains(&id) {
            return Err(NavigationError::NotOnStack {
                title: self.title_of(id),
            });
        }

        while self.top() != id {
            self.pop_one();
        }
        Ok(())
    }

    fn pop_one(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(popped) = self.stack.pop() {
            self.menus[popped.0].set_parent(None);
            debug!(menu = %self.menus[popped.0].title(), depth = self.depth(), "left sub-menu");
        }
    }

    /// Returns to the parent of the current menu
    pub fn back(&mut self) -> Result<(), NavigationError> {
        let top = self.top();
        if self.menus[top.0].parent().is_none() || self.stack.len() <= 1 {
            return Err(NavigationError::NoParent {
                title: self.title_of(top),
            });
        }
        self.pop_one();
        Ok(())
    }

    /// Returns to the root menu regardless of depth
    pub fn reset(&mut self) {
        while self.stack.len() > 1 {
            self.pop_one();
        }
    }

    /// Applies the current menu's close behaviour
    pub fn close(&mut self) -> Result<Response, MenuError> {
        let effect = self.active_menu().close();
        self.apply(effect)
    }

    /// Routes one input to the current menu
    ///
    /// A disabled controller returns [`Response::PassThrough`] for every input.
    /// Callback failures come back as [`MenuError::Action`]; navigation
    /// rejections as [`MenuError::Navigation`] with the stack unchanged.
    pub fn handle_event(&mut self, input: MenuInput, ctx: &mut C) -> Result<Response, MenuError> {
        if !self.enabled {
            return Ok(Response::PassThrough);
        }

        match input {
            MenuInput::Up => {
                self.active_menu_mut().move_focus(FocusDirection::Up);
                Ok(Response::Consumed)
            }
            MenuInput::Down => {
                self.active_menu_mut().move_focus(FocusDirection::Down);
                Ok(Response::Consumed)
            }
            MenuInput::Left => {
                self.active_menu_mut()
                    .move_focused_selector(SelectDirection::Left, ctx)
                    .map_err(MenuError::Action)?;
                Ok(Response::Consumed)
            }
            MenuInput::Right => {
                self.active_menu_mut()
                    .move_focused_selector(SelectDirection::Right, ctx)
                    .map_err(MenuError::Action)?;
                Ok(Response::Consumed)
            }
            MenuInput::Accept => {
                let effect = self
                    .active_menu_mut()
                    .activate_focused(ctx)
                    .map_err(MenuError::Action)?;
                self.apply(effect)
            }
            MenuInput::Close => self.close(),
            MenuInput::Quit => Ok(Response::Exit),
        }
    }

    /// Handles a frame's inputs in order
    ///
    /// Processing stops only at an exit request. A failing input is recorded
    /// and the following inputs are still handled, so none are lost.
    pub fn handle_batch<I>(&mut self, inputs: I, ctx: &mut C) -> BatchOutcome
    where
        I: IntoIterator<Item = MenuInput>,
    {
        let mut outcome = BatchOutcome::default();
        for input in inputs {
            match self.handle_event(input, ctx) {
                Ok(Response::Exit) => {
                    outcome.exit = true;
                    break;
                }
                Ok(Response::PassThrough) => outcome.passed_through.push(input),
                Ok(Response::Consumed) => {}
                Err(error) => {
                    warn!(?input, %error, "menu input failed");
                    outcome.errors.push(error);
                }
            }
        }
        outcome
    }

    fn apply(&mut self, effect: Effect) -> Result<Response, MenuError> {
        match effect {
            Effect::None => Ok(Response::Consumed),
            Effect::Enter(id) => {
                self.push_sub_menu(id).inspect_err(|error| warn!(%error, "cannot open menu"))?;
                Ok(Response::Consumed)
            }
            Effect::Command(command) => self.execute(command),
        }
    }

    fn execute(&mut self, command: SystemCommand) -> Result<Response, MenuError> {
        match command {
            SystemCommand::Reset => self.reset(),
            SystemCommand::Back => {
                self.back().inspect_err(|error| warn!(%error, "back rejected"))?;
            }
            SystemCommand::Close => {
                if self.stack.len() > 1 {
                    self.pop_one();
                } else {
                    self.disable();
                }
            }
            SystemCommand::DisableClose => {}
            SystemCommand::Exit => {
                debug!("exit requested from menu");
                return Ok(Response::Exit);
            }
        }
        Ok(Response::Consumed)
    }

    /// Draws the current menu; nothing while disabled
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        self.active_menu().render(surface)
    }
}

impl<C> fmt::Debug for MenuController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuController")
            .field("menus", &self.menus)
            .field("stack", &self.stack)
            .field("enabled", &self.enabled)
            .finish()
    }
}
