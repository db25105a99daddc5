//! Menu Component
//!
//! An ordered list of widgets with a focus cursor, a close behaviour and a
//! style. Menus never touch the menu stack themselves: activation and closing
//! report an [`Effect`] that the [`MenuController`](super::MenuController)
//! applies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::controller::MenuId;
use super::error::{ActionError, ConfigError};
use super::params::Params;
use super::widget::{Action, Callback, Choice, Effect, SelectDirection, SystemCommand, Widget, WidgetKind};
use crate::color::Color;
use crate::surface::{Rect, Surface};
use crate::text::{draw_text, text_height, text_width};

/// Vertical input for focus navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Up,
    Down,
}

/// Horizontal placement of widget text inside the menu box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Configuration for menu appearance
///
/// Passed through untouched to rendering; navigation never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    /// Menu box width in pixels (clamped to the surface)
    pub width: u32,

    /// Menu box height in pixels (clamped to the surface)
    pub height: u32,

    /// Box background; alpha below 255 lets the host scene show through
    pub background_color: Color,

    /// Darkening of the whole surface behind the box (0 = none)
    pub overlay_alpha: u8,

    pub border_color: Color,

    /// Draws a double border if > 1
    pub border_thickness: u32,

    pub title_color: Color,
    pub title_background_color: Color,
    pub title_scale: u32,

    /// Extra pixels between the top of the title bar and the title text
    pub title_offset_y: u32,

    pub item_color: Color,
    pub selected_item_color: Color,
    pub disabled_item_color: Color,
    pub highlight_color: Color,
    pub item_scale: u32,

    /// Colour and scale of text lines
    pub text_color: Color,
    pub text_scale: u32,

    /// Vertical gap between rows
    pub item_spacing: u32,

    pub align: TextAlign,

    /// Drop shadow under option text
    pub shadow: Option<Color>,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            width: 500,
            height: 360,
            background_color: Color::RGB(30, 30, 40),
            overlay_alpha: 0,
            border_color: Color::RGB(100, 100, 120),
            border_thickness: 2,
            title_color: Color::RGB(220, 220, 240),
            title_background_color: Color::RGB(20, 20, 28),
            title_scale: 3,
            title_offset_y: 0,
            item_color: Color::RGB(160, 160, 170),
            selected_item_color: Color::RGB(255, 255, 255),
            disabled_item_color: Color::RGB(90, 90, 100),
            highlight_color: Color::RGB(80, 100, 140),
            item_scale: 3,
            text_color: Color::RGB(200, 200, 210),
            text_scale: 2,
            item_spacing: 18,
            align: TextAlign::Left,
            shadow: None,
        }
    }
}

/// Draw hook run before the menu itself
pub type Background = Box<dyn Fn(&mut dyn Surface) -> Result<(), String>>;

const TITLE_PADDING: u32 = 12;
const CONTENT_MARGIN: u32 = 24;

/// A navigable menu
///
/// # Example
///
/// ```
/// use overlay_menu::{FocusDirection, Menu, SystemCommand};
///
/// let mut menu: Menu<()> = Menu::new("Help").with_on_close(SystemCommand::DisableClose);
/// menu.add_option("Return to Menu", SystemCommand::Back).unwrap();
/// menu.add_line("Press ESC to enable/disable Menu");
///
/// menu.move_focus(FocusDirection::Down);
/// assert_eq!(menu.focused(), Some(0)); // text lines never take focus
/// ```
pub struct Menu<C> {
    title: String,
    widgets: Vec<Widget<C>>,
    focus: Option<usize>,
    on_close: SystemCommand,
    parent: Option<MenuId>,
    pauses_host: bool,
    style: MenuStyle,
    background: Option<Background>,
}

impl<C> Menu<C> {
    /// Creates an empty menu with default styling that pops on close
    pub fn new(title: impl Into<String>) -> Self {
        Menu::with_style(title, MenuStyle::default())
    }

    pub fn with_style(title: impl Into<String>, style: MenuStyle) -> Self {
        Menu {
            title: title.into(),
            widgets: Vec::new(),
            focus: None,
            on_close: SystemCommand::Close,
            parent: None,
            pauses_host: false,
            style,
            background: None,
        }
    }

    /// What the close input does while this menu is on top
    pub fn with_on_close(mut self, on_close: SystemCommand) -> Self {
        self.on_close = on_close;
        self
    }

    pub fn with_background<F>(mut self, background: F) -> Self
    where
        F: Fn(&mut dyn Surface) -> Result<(), String> + 'static,
    {
        self.background = Some(Box::new(background));
        self
    }

    /// Host should suspend its own simulation while this menu is active
    pub fn with_pauses_host(mut self, pauses_host: bool) -> Self {
        self.pauses_host = pauses_host;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn widgets(&self) -> &[Widget<C>] {
        &self.widgets
    }

    pub fn on_close(&self) -> SystemCommand {
        self.on_close
    }

    /// Menu this one was entered from, while it is on the stack
    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<MenuId>) {
        self.parent = parent;
    }

    pub fn pauses_host(&self) -> bool {
        self.pauses_host
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: MenuStyle) {
        self.style = style;
    }

    /// Index of the focused widget, `None` when nothing is focusable
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused_widget(&self) -> Option<&Widget<C>> {
        self.focus.map(|index| &self.widgets[index])
    }

    pub fn add_option(
        &mut self,
        label: impl Into<String>,
        action: impl Into<Action<C>>,
    ) -> Result<usize, ConfigError> {
        self.add_option_with(label, action, Params::new())
    }

    /// Adds an option whose callback receives `params` on every call
    pub fn add_option_with(
        &mut self,
        label: impl Into<String>,
        action: impl Into<Action<C>>,
        params: Params,
    ) -> Result<usize, ConfigError> {
        let widget = Widget::option(label, action.into(), params)?;
        Ok(self.push(widget))
    }

    pub fn add_selector(
        &mut self,
        label: impl Into<String>,
        choices: Vec<Choice>,
        default_index: usize,
        on_change: Option<Callback<C>>,
        on_return: Option<Callback<C>>,
        params: Params,
    ) -> Result<usize, ConfigError> {
        let widget = Widget::selector(label, choices, default_index, on_change, on_return, params)?;
        Ok(self.push(widget))
    }

    /// Appends a non-focusable text line
    pub fn add_line(&mut self, text: impl Into<String>) -> usize {
        self.push(Widget::line(text))
    }

    fn push(&mut self, widget: Widget<C>) -> usize {
        self.widgets.push(widget);
        let index = self.widgets.len() - 1;
        if self.focus.is_none() && self.widgets[index].is_focusable() {
            self.focus = Some(index);
        }
        index
    }

    /// Enables or disables a widget, moving focus off it if needed
    pub fn set_widget_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ConfigError> {
        let Some(widget) = self.widgets.get_mut(index) else {
            return Err(ConfigError::NoSuchWidget {
                menu: self.title.clone(),
                index,
            });
        };
        widget.set_enabled(enabled);
        self.repair_focus(index);
        Ok(())
    }

    /// Restores the focus invariant after widget `changed` toggled
    fn repair_focus(&mut self, changed: usize) {
        match self.focus {
            Some(current) if self.widgets[current].is_focusable() => {}
            Some(current) => self.focus = self.next_focusable(current, FocusDirection::Down),
            None if self.widgets[changed].is_focusable() => self.focus = Some(changed),
            None => {}
        }
    }

    /// Next focusable widget after `from`, wrapping; may return `from` itself
    fn next_focusable(&self, from: usize, direction: FocusDirection) -> Option<usize> {
        let len = self.widgets.len();
        (1..=len)
            .map(|step| match direction {
                FocusDirection::Down => (from + step) % len,
                FocusDirection::Up => (from + len - step) % len,
            })
            .find(|&index| self.widgets[index].is_focusable())
    }

    /// Moves focus to the next/previous focusable widget, wrapping at the ends
    pub fn move_focus(&mut self, direction: FocusDirection) {
        if let Some(current) = self.focus {
            self.focus = self.next_focusable(current, direction);
        }
    }

    /// Accepts the focused widget
    pub fn activate_focused(&mut self, ctx: &mut C) -> Result<Effect, ActionError> {
        match self.focus {
            Some(index) => self.widgets[index].activate(ctx),
            None => Ok(Effect::None),
        }
    }

    /// Cycles the focused widget if it is a selector
    pub fn move_focused_selector(
        &mut self,
        direction: SelectDirection,
        ctx: &mut C,
    ) -> Result<(), ActionError> {
        match self.focus {
            Some(index) => self.widgets[index].move_selection(direction, ctx),
            None => Ok(()),
        }
    }

    /// Close request: the controller applies the returned command
    pub fn close(&self) -> Effect {
        Effect::Command(self.on_close)
    }

    /// Box occupied by the menu on a surface of the given size
    pub fn frame(&self, surface_size: (u32, u32)) -> Rect {
        let (screen_width, screen_height) = surface_size;
        let width = self.style.width.min(screen_width);
        let height = self.style.height.min(screen_height);
        Rect::new(
            ((screen_width - width) / 2) as i32,
            ((screen_height - height) / 2) as i32,
            width,
            height,
        )
    }

    /// Render the menu at the surface centre
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), String> {
        let style = &self.style;

        // 1. Host background hook, then darken the scene
        if let Some(background) = &self.background {
            background(surface)?;
        }
        if style.overlay_alpha > 0 {
            surface.fill(Color::RGBA(0, 0, 0, style.overlay_alpha))?;
        }

        // 2. Box and border
        let frame = self.frame(surface.size());
        surface.fill_rect(frame, style.background_color)?;
        surface.draw_rect(frame, style.border_color)?;
        if style.border_thickness > 1 && frame.width > 4 && frame.height > 4 {
            surface.draw_rect(
                Rect::new(frame.x + 2, frame.y + 2, frame.width - 4, frame.height - 4),
                style.border_color,
            )?;
        }

        // 3. Title bar
        let title_bar_height = text_height(style.title_scale) + 2 * TITLE_PADDING + style.title_offset_y;
        surface.fill_rect(
            Rect::new(frame.x, frame.y, frame.width, title_bar_height.min(frame.height)),
            style.title_background_color,
        )?;
        let title_width = text_width(&self.title, style.title_scale);
        draw_text(
            surface,
            &self.title,
            frame.x + (frame.width.saturating_sub(title_width) / 2) as i32,
            frame.y + (TITLE_PADDING + style.title_offset_y) as i32,
            style.title_color,
            style.title_scale,
        )?;

        // 4. Widgets, clipped at the box bottom
        let mut row_y = frame.y + (title_bar_height + style.item_spacing) as i32;
        for (i, widget) in self.widgets.iter().enumerate() {
            let is_line = matches!(widget.kind(), WidgetKind::TextLine);
            let scale = if is_line { style.text_scale } else { style.item_scale };
            let row_height = text_height(scale);
            if row_y + row_height as i32 > frame.bottom() {
                break;
            }

            let text = match widget.selected_choice() {
                Some(choice) => format!("{}  < {} >", widget.label(), choice.label),
                None => widget.label().to_string(),
            };
            let text_x = match style.align {
                TextAlign::Left => frame.x + CONTENT_MARGIN as i32,
                TextAlign::Center => {
                    frame.x + (frame.width.saturating_sub(text_width(&text, scale)) / 2) as i32
                }
            };

            let is_focused = self.focus == Some(i);
            if is_focused {
                surface.fill_rect(
                    Rect::new(
                        frame.x + (CONTENT_MARGIN / 2) as i32,
                        row_y - (style.item_spacing / 4) as i32,
                        frame.width.saturating_sub(CONTENT_MARGIN),
                        row_height + style.item_spacing / 2,
                    ),
                    style.highlight_color,
                )?;
            }

            let color = if is_line {
                style.text_color
            } else if !widget.is_enabled() {
                style.disabled_item_color
            } else if is_focused {
                style.selected_item_color
            } else {
                style.item_color
            };

            if let (Some(shadow), false) = (style.shadow, is_line) {
                draw_text(surface, &text, text_x + scale as i32, row_y + scale as i32, shadow, scale)?;
            }
            draw_text(surface, &text, text_x, row_y, color, scale)?;

            row_y += (row_height + style.item_spacing) as i32;
        }

        Ok(())
    }
}

impl<C> fmt::Debug for Menu<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title)
            .field("widgets", &self.widgets)
            .field("focus", &self.focus)
            .field("on_close", &self.on_close)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn root_menu() -> Menu<()> {
        let mut menu = Menu::new("Main Menu");
        menu.add_option("Timer Menu", MenuId::from_index(1)).unwrap();
        menu.add_option("Help", MenuId::from_index(2)).unwrap();
        menu.add_option("Exit", SystemCommand::Exit).unwrap();
        menu
    }

    #[test]
    fn test_focus_starts_on_first_focusable() {
        let mut menu: Menu<()> = Menu::new("About");
        assert_eq!(menu.focused(), None);
        menu.add_line("overlay_menu");
        assert_eq!(menu.focused(), None);
        menu.add_option("Return to Menu", SystemCommand::Back).unwrap();
        assert_eq!(menu.focused(), Some(1));
    }

    #[test]
    fn test_move_focus_wraps_both_ways() {
        let mut menu = root_menu();
        menu.move_focus(FocusDirection::Up);
        assert_eq!(menu.focused(), Some(2));
        menu.move_focus(FocusDirection::Down);
        assert_eq!(menu.focused(), Some(0));
    }

    #[test]
    fn test_move_focus_skips_lines_and_disabled() {
        let mut menu: Menu<()> = Menu::new("Mixed");
        menu.add_option("A", SystemCommand::Back).unwrap();
        menu.add_line("---");
        menu.add_option("B", SystemCommand::Back).unwrap();
        menu.add_option("C", SystemCommand::Back).unwrap();
        menu.set_widget_enabled(2, false).unwrap();

        menu.move_focus(FocusDirection::Down);
        assert_eq!(menu.focused(), Some(3));
        menu.move_focus(FocusDirection::Down);
        assert_eq!(menu.focused(), Some(0));
    }

    #[test]
    fn test_navigation_without_focusable_widgets_is_noop() {
        let mut menu: Menu<()> = Menu::new("Lines");
        menu.add_line("one");
        menu.add_line("two");
        menu.move_focus(FocusDirection::Down);
        assert_eq!(menu.focused(), None);
        assert_eq!(menu.activate_focused(&mut ()).unwrap(), Effect::None);
    }

    #[test]
    fn test_disabling_focused_widget_moves_focus() {
        let mut menu = root_menu();
        menu.set_widget_enabled(0, false).unwrap();
        assert_eq!(menu.focused(), Some(1));

        menu.set_widget_enabled(1, false).unwrap();
        menu.set_widget_enabled(2, false).unwrap();
        assert_eq!(menu.focused(), None);

        menu.set_widget_enabled(1, true).unwrap();
        assert_eq!(menu.focused(), Some(1));
    }

    #[test]
    fn test_rejected_widgets_leave_menu_untouched() {
        let mut menu = root_menu();
        menu.move_focus(FocusDirection::Down);
        let before = (menu.widgets().len(), menu.focused());

        assert_eq!(
            menu.add_option("", SystemCommand::Back),
            Err(ConfigError::EmptyLabel)
        );
        assert!(matches!(
            menu.add_selector("Change bgcolor", Vec::new(), 0, None, None, Params::new()),
            Err(ConfigError::EmptyChoices { .. })
        ));
        assert!(matches!(
            menu.add_selector(
                "Change bgcolor",
                vec![Choice::new("Black", Color::BLACK)],
                3,
                None,
                None,
                Params::new(),
            ),
            Err(ConfigError::DefaultOutOfRange { index: 3, len: 1, .. })
        ));

        assert_eq!((menu.widgets().len(), menu.focused()), before);
        assert_eq!(before, (3, Some(1)));

        let mut empty: Menu<()> = Menu::new("About");
        assert!(empty.add_option("  ", SystemCommand::Back).is_err());
        assert!(empty.widgets().is_empty());
        assert_eq!(empty.focused(), None);
    }

    #[test]
    fn test_set_widget_enabled_out_of_range() {
        let mut menu = root_menu();
        assert_eq!(
            menu.set_widget_enabled(9, false),
            Err(ConfigError::NoSuchWidget {
                menu: "Main Menu".to_string(),
                index: 9,
            })
        );
    }

    #[test]
    fn test_close_reports_configured_behavior() {
        let menu: Menu<()> = Menu::new("Help").with_on_close(SystemCommand::DisableClose);
        assert_eq!(menu.close(), Effect::Command(SystemCommand::DisableClose));
        assert_eq!(Menu::<()>::new("x").close(), Effect::Command(SystemCommand::Close));
    }

    #[test]
    fn test_frame_is_centered_and_clamped() {
        let menu: Menu<()> = Menu::with_style(
            "Timer Menu",
            MenuStyle {
                width: 600,
                height: 390,
                ..Default::default()
            },
        );
        assert_eq!(menu.frame((800, 600)), Rect::new(100, 105, 600, 390));
        assert_eq!(menu.frame((400, 300)), Rect::new(0, 0, 400, 300));
    }

    #[test]
    fn test_render_highlights_only_focused_row() {
        let style = MenuStyle::default();
        let mut menu = root_menu();
        menu.set_style(style.clone());
        menu.move_focus(FocusDirection::Down);

        let mut surface = RecordingSurface::new(800, 600);
        menu.render(&mut surface).unwrap();

        let highlights = surface.rects_with_color(style.highlight_color);
        assert_eq!(highlights.len(), 1);
        assert!(menu.frame((800, 600)).contains_rect(&highlights[0]));
        assert!(!surface.rects_with_color(style.selected_item_color).is_empty());
    }

    #[test]
    fn test_render_calls_background_first() {
        let menu: Menu<()> = Menu::new("Main Menu")
            .with_background(|surface: &mut dyn Surface| surface.fill(Color::RGB(40, 0, 40)));

        let mut surface = RecordingSurface::new(800, 600);
        menu.render(&mut surface).unwrap();
        assert_eq!(
            surface.ops().first(),
            Some(&crate::surface::DrawOp::Fill(Color::RGB(40, 0, 40)))
        );
    }

    #[test]
    fn test_render_clips_rows_to_frame() {
        let mut menu: Menu<()> = Menu::with_style(
            "Long",
            MenuStyle {
                height: 120,
                ..Default::default()
            },
        );
        for i in 0..20 {
            menu.add_line(format!("line {i}"));
        }

        let mut surface = RecordingSurface::new(800, 600);
        menu.render(&mut surface).unwrap();
        let frame = menu.frame((800, 600));
        let text_rects = surface.rects_with_color(menu.style().text_color);
        assert!(!text_rects.is_empty());
        assert!(text_rects.iter().all(|rect| rect.bottom() <= frame.bottom()));
    }
}
