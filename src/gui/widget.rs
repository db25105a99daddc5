//! Menu Widgets
//!
//! A widget is one row of a menu: a selectable option, a selector cycling
//! through a fixed list of choices, or a plain text line. Widgets run their
//! bound callbacks directly, but anything that touches the menu stack (system
//! commands, entering a sub-menu) is handed back to the controller as an
//! [`Effect`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::controller::MenuId;
use super::error::{ActionError, ActionResult, ConfigError};
use super::params::{ParamValue, Params};

/// Boxed host callback, invoked with the host context and the call arguments
pub type Callback<C> = Box<dyn FnMut(&mut C, &Invocation<'_>) -> ActionResult>;

/// Boxes a closure or function as a [`Callback`]
pub fn callback<C, F>(f: F) -> Callback<C>
where
    F: FnMut(&mut C, &Invocation<'_>) -> ActionResult + 'static,
{
    Box::new(f)
}

/// Fixed instructions handled by the controller instead of a user callback
///
/// Also used as a menu's close behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemCommand {
    /// Pop everything above the root menu
    Reset,
    /// Return to the menu that opened this one
    Back,
    /// Pop this menu; on the root menu, hide the overlay
    Close,
    /// Do nothing
    DisableClose,
    /// Ask the host to terminate
    Exit,
}

/// What an option does when accepted
pub enum Action<C> {
    Callback(Callback<C>),
    Command(SystemCommand),
    SubMenu(MenuId),
}

impl<C> Action<C> {
    pub fn callback<F>(f: F) -> Self
    where
        F: FnMut(&mut C, &Invocation<'_>) -> ActionResult + 'static,
    {
        Action::Callback(Box::new(f))
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Callback(_) => f.write_str("Callback(..)"),
            Action::Command(command) => f.debug_tuple("Command").field(command).finish(),
            Action::SubMenu(id) => f.debug_tuple("SubMenu").field(id).finish(),
        }
    }
}

impl<C> From<SystemCommand> for Action<C> {
    fn from(command: SystemCommand) -> Self {
        Action::Command(command)
    }
}

impl<C> From<MenuId> for Action<C> {
    fn from(id: MenuId) -> Self {
        Action::SubMenu(id)
    }
}

/// One entry of a selector
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: ParamValue,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Choice {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The selector choice a callback was invoked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub index: usize,
    pub label: &'a str,
    pub value: &'a ParamValue,
}

/// Arguments of a single callback invocation
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Current choice when the caller is a selector
    pub selection: Option<Selection<'a>>,
    /// Bundle bound when the widget was created
    pub params: &'a Params,
}

impl Invocation<'_> {
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

/// Horizontal input for selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectDirection {
    Left,
    Right,
}

/// Stack change requested by an activated widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Command(SystemCommand),
    Enter(MenuId),
}

pub enum WidgetKind<C> {
    Option {
        action: Action<C>,
        params: Params,
    },
    Selector {
        choices: Vec<Choice>,
        index: usize,
        on_change: Option<Callback<C>>,
        on_return: Option<Callback<C>>,
        params: Params,
    },
    TextLine,
}

/// A single row of a menu
pub struct Widget<C> {
    label: String,
    kind: WidgetKind<C>,
    enabled: bool,
}

fn check_label(label: &str) -> Result<(), ConfigError> {
    if label.trim().is_empty() {
        return Err(ConfigError::EmptyLabel);
    }
    Ok(())
}

impl<C> Widget<C> {
    /// Selectable option bound to `action`
    pub fn option(
        label: impl Into<String>,
        action: Action<C>,
        params: Params,
    ) -> Result<Self, ConfigError> {
        let label = label.into();
        check_label(&label)?;

        Ok(Widget {
            label,
            kind: WidgetKind::Option { action, params },
            enabled: true,
        })
    }

    /// Selector starting at `default_index`
    pub fn selector(
        label: impl Into<String>,
        choices: Vec<Choice>,
        default_index: usize,
        on_change: Option<Callback<C>>,
        on_return: Option<Callback<C>>,
        params: Params,
    ) -> Result<Self, ConfigError> {
        let label = label.into();
        check_label(&label)?;

        if choices.is_empty() {
            return Err(ConfigError::EmptyChoices { label });
        }
        if default_index >= choices.len() {
            return Err(ConfigError::DefaultOutOfRange {
                label,
                index: default_index,
                len: choices.len(),
            });
        }

        Ok(Widget {
            label,
            kind: WidgetKind::Selector {
                choices,
                index: default_index,
                on_change,
                on_return,
                params,
            },
            enabled: true,
        })
    }

    /// Non-focusable text line; empty text makes a blank line
    pub fn line(text: impl Into<String>) -> Self {
        Widget {
            label: text.into(),
            kind: WidgetKind::TextLine,
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &WidgetKind<C> {
        &self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_selector(&self) -> bool {
        matches!(self.kind, WidgetKind::Selector { .. })
    }

    /// Whether navigation may stop on this widget
    pub fn is_focusable(&self) -> bool {
        self.enabled && !matches!(self.kind, WidgetKind::TextLine)
    }

    /// Current choice of a selector
    pub fn selected_choice(&self) -> Option<&Choice> {
        match &self.kind {
            WidgetKind::Selector { choices, index, .. } => choices.get(*index),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match &self.kind {
            WidgetKind::Selector { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Runs the widget's accept behaviour
    ///
    /// Callbacks run synchronously and their errors are returned untouched.
    /// Commands and sub-menu targets come back as an [`Effect`].
    pub fn activate(&mut self, ctx: &mut C) -> Result<Effect, ActionError> {
        if !self.enabled {
            return Ok(Effect::None);
        }

        match &mut self.kind {
            WidgetKind::Option { action, params } => match action {
                Action::Callback(run) => {
                    run(
                        ctx,
                        &Invocation {
                            selection: None,
                            params,
                        },
                    )?;
                    Ok(Effect::None)
                }
                Action::Command(command) => Ok(Effect::Command(*command)),
                Action::SubMenu(id) => Ok(Effect::Enter(*id)),
            },
            WidgetKind::Selector {
                choices,
                index,
                on_return,
                params,
                ..
            } => {
                if let Some(on_return) = on_return {
                    let choice = &choices[*index];
                    on_return(
                        ctx,
                        &Invocation {
                            selection: Some(Selection {
                                index: *index,
                                label: &choice.label,
                                value: &choice.value,
                            }),
                            params,
                        },
                    )?;
                }
                Ok(Effect::None)
            }
            WidgetKind::TextLine => Ok(Effect::None),
        }
    }

    /// Cycles a selector one step, wrapping at both ends, then fires `on_change`
    ///
    /// No-op for other widget kinds.
    pub fn move_selection(
        &mut self,
        direction: SelectDirection,
        ctx: &mut C,
    ) -> Result<(), ActionError> {
        if !self.enabled {
            return Ok(());
        }

        let WidgetKind::Selector {
            choices,
            index,
            on_change,
            params,
            ..
        } = &mut self.kind
        else {
            return Ok(());
        };

        let len = choices.len();
        *index = match direction {
            SelectDirection::Left => (*index + len - 1) % len,
            SelectDirection::Right => (*index + 1) % len,
        };

        if let Some(on_change) = on_change {
            let choice = &choices[*index];
            on_change(
                ctx,
                &Invocation {
                    selection: Some(Selection {
                        index: *index,
                        label: &choice.label,
                        value: &choice.value,
                    }),
                    params,
                },
            )?;
        }

        Ok(())
    }
}

impl<C> fmt::Debug for Widget<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            WidgetKind::Option { .. } => "Option",
            WidgetKind::Selector { .. } => "Selector",
            WidgetKind::TextLine => "TextLine",
        };
        f.debug_struct("Widget")
            .field("label", &self.label)
            .field("kind", &kind)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        calls: Vec<String>,
    }

    fn record(log: &mut Log, invocation: &Invocation<'_>) -> ActionResult {
        let entry = match invocation.selection {
            Some(selection) => format!("{}:{}", selection.index, selection.label),
            None => "option".to_string(),
        };
        log.calls.push(entry);
        Ok(())
    }

    fn colors() -> Vec<Choice> {
        vec![
            Choice::new("Random", "random"),
            Choice::new("Default", crate::Color::RGB(128, 0, 128)),
            Choice::new("Black", crate::Color::RGB(0, 0, 0)),
            Choice::new("Blue", crate::Color::RGB(12, 12, 200)),
        ]
    }

    #[test]
    fn test_empty_label_rejected() {
        let result = Widget::<Log>::option("  ", SystemCommand::Back.into(), Params::new());
        assert_eq!(result.err(), Some(ConfigError::EmptyLabel));

        let result = Widget::<Log>::selector("", colors(), 0, None, None, Params::new());
        assert_eq!(result.err(), Some(ConfigError::EmptyLabel));
    }

    #[test]
    fn test_selector_construction_errors() {
        let result = Widget::<Log>::selector("Color", Vec::new(), 0, None, None, Params::new());
        assert!(matches!(result, Err(ConfigError::EmptyChoices { .. })));

        let result = Widget::<Log>::selector("Color", colors(), 4, None, None, Params::new());
        assert_eq!(
            result.err(),
            Some(ConfigError::DefaultOutOfRange {
                label: "Color".to_string(),
                index: 4,
                len: 4,
            })
        );
    }

    #[test]
    fn test_option_callback_runs_with_params() {
        let mut log = Log::default();
        let mut widget = Widget::option(
            "Reset timer",
            Action::callback(|log: &mut Log, invocation: &Invocation<'_>| {
                assert_eq!(invocation.param("tag"), Some(&ParamValue::from("x")));
                record(log, invocation)
            }),
            Params::new().with("tag", "x"),
        )
        .unwrap();

        assert_eq!(widget.activate(&mut log).unwrap(), Effect::None);
        assert_eq!(log.calls, vec!["option"]);
    }

    #[test]
    fn test_commands_and_submenus_become_effects() {
        let mut log = Log::default();
        let mut back = Widget::option("Back", SystemCommand::Back.into(), Params::new()).unwrap();
        let mut enter = Widget::option("Timer", MenuId::from_index(3).into(), Params::new()).unwrap();

        assert_eq!(back.activate(&mut log).unwrap(), Effect::Command(SystemCommand::Back));
        assert_eq!(enter.activate(&mut log).unwrap(), Effect::Enter(MenuId::from_index(3)));
        assert!(log.calls.is_empty());
    }

    #[test]
    fn test_selector_wraps_left_and_fires_on_change() {
        let mut log = Log::default();
        let mut widget = Widget::selector(
            "Change bgcolor",
            colors(),
            1,
            Some(callback(record)),
            None,
            Params::new(),
        )
        .unwrap();

        widget.move_selection(SelectDirection::Left, &mut log).unwrap();
        assert_eq!(widget.selected_index(), Some(0));
        widget.move_selection(SelectDirection::Left, &mut log).unwrap();
        assert_eq!(widget.selected_index(), Some(3));
        assert_eq!(log.calls, vec!["0:Random", "3:Blue"]);
    }

    #[test]
    fn test_selector_return_reports_current_choice() {
        let mut log = Log::default();
        let mut widget = Widget::selector(
            "Change bgcolor",
            colors(),
            2,
            None,
            Some(callback(record)),
            Params::new(),
        )
        .unwrap();

        assert_eq!(widget.activate(&mut log).unwrap(), Effect::None);
        assert_eq!(log.calls, vec!["2:Black"]);
    }

    #[test]
    fn test_single_choice_selector_still_notifies() {
        let mut log = Log::default();
        let mut widget = Widget::selector(
            "Only",
            vec![Choice::new("One", 1_i64)],
            0,
            Some(callback(record)),
            None,
            Params::new(),
        )
        .unwrap();

        widget.move_selection(SelectDirection::Right, &mut log).unwrap();
        assert_eq!(widget.selected_index(), Some(0));
        assert_eq!(log.calls, vec!["0:One"]);
    }

    #[test]
    fn test_callback_error_propagates() {
        let mut log = Log::default();
        let mut widget = Widget::option(
            "Boom",
            Action::callback(|_: &mut Log, _: &Invocation<'_>| Err("boom".into())),
            Params::new(),
        )
        .unwrap();

        let error = widget.activate(&mut log).unwrap_err();
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_text_lines_and_disabled_widgets_are_not_focusable() {
        let line = Widget::<Log>::line("");
        assert!(!line.is_focusable());

        let mut option = Widget::<Log>::option("Exit", SystemCommand::Exit.into(), Params::new()).unwrap();
        assert!(option.is_focusable());
        option.set_enabled(false);
        assert!(!option.is_focusable());
        assert_eq!(option.activate(&mut Log::default()).unwrap(), Effect::None);
    }
}
