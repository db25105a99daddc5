//! Example Application
//!
//! Everything the demo binary shows: a clock that counts up, a background
//! colour that menu callbacks change, and the four menus (Main, Timer, Help,
//! About). Kept out of `main.rs` so it runs without a window.

use chrono::TimeDelta;
use tracing::debug;

use crate::color::Color;
use crate::config::AppConfig;
use crate::gui::{
    Action, ActionResult, Choice, Invocation, Menu, MenuController, MenuError, MenuId, MenuStyle,
    ParamValue, Params, SystemCommand, TextAlign, callback,
};
use crate::surface::Surface;
use crate::text::{draw_text, text_height, text_width};

pub const HELP: [&str; 4] = [
    "Press ESC to enable/disable Menu",
    "Press ENTER to access a Sub-Menu or use an option",
    "Press UP/DOWN to move through Menu",
    "Press LEFT/RIGHT to move through Selectors",
];

pub const COLOR_BLUE: Color = Color::RGB(12, 12, 200);
pub const COLOR_DEFAULT_BACKGROUND: Color = Color::RGB(128, 0, 128);
pub const COLOR_MAIN_MENU_BACKGROUND: Color = Color::RGB(40, 0, 40);

/// Choice value standing for "pick a random colour"
pub const RANDOM_COLOR: &str = "random";

const CLOCK_SCALE: u32 = 12;

fn about_lines() -> Vec<String> {
    vec![
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        String::new(),
        env!("CARGO_PKG_DESCRIPTION").to_string(),
        String::new(),
    ]
}

/// Elapsed-time counter driven by the frame clock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stopwatch {
    elapsed: f64,
}

impl Stopwatch {
    pub fn tick(&mut self, dt: f64) {
        self.elapsed += dt.max(0.0);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    /// `H:MM:SS`, with a `N day(s), ` prefix past 24 hours
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed as i64)
    }
}

pub fn format_elapsed(seconds: i64) -> String {
    let delta = TimeDelta::try_seconds(seconds.max(0)).unwrap_or(TimeDelta::MAX);
    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;
    let secs = delta.num_seconds() % 60;

    let clock = format!("{hours}:{minutes:02}:{secs:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Small xorshift generator for the "Random" background choice
#[derive(Debug, Clone)]
pub struct ColorRng {
    state: u64,
}

impl ColorRng {
    pub fn new(seed: u64) -> Self {
        // xorshift gets stuck on zero
        ColorRng {
            state: seed.max(1),
        }
    }

    /// Seeded from the wall clock
    pub fn from_time() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        ColorRng::new(nanos as u64)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Each channel in 0..255
    pub fn next_color(&mut self) -> Color {
        let bits = self.next_u64();
        let channel = |shift: u32| ((bits >> shift) % 255) as u8;
        Color::RGB(channel(0), channel(16), channel(32))
    }
}

/// Host state shared with menu callbacks
#[derive(Debug, Clone)]
pub struct AppState {
    pub timer: Stopwatch,
    pub background: Color,
    pub settings_updates: u32,
    rng: ColorRng,
}

impl AppState {
    pub fn new() -> Self {
        AppState::with_rng(ColorRng::from_time())
    }

    pub fn with_rng(rng: ColorRng) -> Self {
        AppState {
            timer: Stopwatch::default(),
            background: COLOR_DEFAULT_BACKGROUND,
            settings_updates: 0,
            rng,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Sets the background from the selected choice
///
/// The `write_on_console` parameter echoes the change to stdout.
pub fn change_color_bg(state: &mut AppState, invocation: &Invocation<'_>) -> ActionResult {
    let Some(selection) = invocation.selection else {
        return Err("change_color_bg needs a selector choice".into());
    };

    let color = match selection.value {
        ParamValue::Color(color) => *color,
        ParamValue::Text(text) if text == RANDOM_COLOR => state.rng.next_color(),
        other => return Err(format!("not a colour: {other:?}").into()),
    };

    if invocation.params.get_bool("write_on_console").unwrap_or(false) {
        println!(
            "New background color: {} ({},{},{})",
            selection.label, color.r, color.g, color.b
        );
    }
    state.background = color;
    Ok(())
}

pub fn reset_timer(state: &mut AppState, _: &Invocation<'_>) -> ActionResult {
    state.timer.reset();
    Ok(())
}

/// Stand-in for a game object whose method is bound to a menu option
#[derive(Debug, Default)]
pub struct GameSettings {
    applied: u32,
}

impl GameSettings {
    pub fn update_game_settings(&mut self, state: &mut AppState) -> ActionResult {
        self.applied += 1;
        state.settings_updates += 1;
        println!("Update game with new settings");
        debug!(times = self.applied, "game settings applied");
        Ok(())
    }
}

fn timer_style() -> MenuStyle {
    MenuStyle {
        width: 600,
        height: 390,
        background_color: Color::RGBA(0, 0, 0, 216),
        title_background_color: Color::BLACK,
        title_offset_y: 5,
        border_thickness: 4,
        shadow: Some(Color::RGB(40, 40, 40)),
        ..Default::default()
    }
}

fn help_style() -> MenuStyle {
    MenuStyle {
        width: 760,
        height: 400,
        background_color: Color::RGB(30, 50, 107),
        title_background_color: Color::RGB(120, 45, 30),
        align: TextAlign::Center,
        shadow: Some(Color::RGB(10, 20, 50)),
        ..Default::default()
    }
}

fn about_style() -> MenuStyle {
    MenuStyle {
        width: 600,
        height: 360,
        title_background_color: COLOR_BLUE,
        title_scale: 4,
        shadow: Some(Color::RGB(10, 10, 20)),
        ..Default::default()
    }
}

fn main_style() -> MenuStyle {
    MenuStyle {
        width: 500,
        height: 330,
        background_color: Color::RGBA(30, 30, 40, 230),
        align: TextAlign::Center,
        title_offset_y: 5,
        ..Default::default()
    }
}

fn build_timer_menu() -> Result<Menu<AppState>, MenuError> {
    let mut menu = Menu::with_style("Timer Menu", timer_style()).with_on_close(SystemCommand::Reset);
    menu.add_option("Reset timer", Action::callback(reset_timer))?;
    menu.add_selector(
        "Change bgcolor",
        vec![
            Choice::new("Random", RANDOM_COLOR),
            Choice::new("Default", COLOR_DEFAULT_BACKGROUND),
            Choice::new("Black", Color::BLACK),
            Choice::new("Blue", COLOR_BLUE),
        ],
        1,
        Some(callback(change_color_bg)),
        Some(callback(change_color_bg)),
        Params::new().with("write_on_console", true),
    )?;

    let mut settings = GameSettings::default();
    menu.add_option(
        "Update game object",
        Action::callback(move |state: &mut AppState, _: &Invocation<'_>| {
            settings.update_game_settings(state)
        }),
    )?;
    menu.add_option("Return to Menu", SystemCommand::Back)?;
    menu.add_option("Close Menu", SystemCommand::Close)?;
    Ok(menu)
}

fn build_text_menu(
    title: &str,
    style: MenuStyle,
    lines: impl IntoIterator<Item = String>,
) -> Result<Menu<AppState>, MenuError> {
    let mut menu = Menu::with_style(title, style).with_on_close(SystemCommand::DisableClose);
    menu.add_option("Return to Menu", SystemCommand::Back)?;
    for line in lines {
        menu.add_line(line);
    }
    Ok(menu)
}

/// Builds the demo's menu tree; the controller starts disabled
pub fn build_menus(config: &AppConfig) -> Result<MenuController<AppState>, MenuError> {
    let main_menu = Menu::with_style(
        "Main Menu",
        config.main_menu_style.clone().unwrap_or_else(main_style),
    )
    .with_on_close(SystemCommand::Close)
    .with_pauses_host(true)
    .with_background(|surface: &mut dyn Surface| surface.fill(COLOR_MAIN_MENU_BACKGROUND));

    let mut controller = MenuController::new(main_menu);
    let timer = controller.add_menu(build_timer_menu()?);
    let help = controller.add_menu(build_text_menu(
        "Help",
        help_style(),
        HELP.iter().map(|line| line.to_string()),
    )?);
    let about = controller.add_menu(build_text_menu("About", about_style(), about_lines())?);

    for id in [timer, help, about] {
        let title = controller.menu(id)?.title().to_string();
        controller.menu_mut(MenuId::ROOT)?.add_option(title, id)?;
    }
    controller
        .menu_mut(MenuId::ROOT)?
        .add_option("Exit", SystemCommand::Exit)?;

    Ok(controller)
}

/// Draws the elapsed time centred on the surface
pub fn render_clock(surface: &mut dyn Surface, state: &AppState) -> Result<(), String> {
    let text = state.timer.display();
    let (width, height) = surface.size();
    let x = (width as i32 - text_width(&text, CLOCK_SCALE) as i32) / 2;
    let y = (height as i32 - text_height(CLOCK_SCALE) as i32) / 2;
    draw_text(surface, &text, x, y, Color::WHITE, CLOCK_SCALE)
}
