use proptest::prelude::*;

use overlay_menu::{
    Choice, FocusDirection, Menu, MenuController, MenuId, MenuInput, Params, SelectDirection,
    SystemCommand,
};

/// Row layout: `true` is an option, `false` a text line
fn menu_from(rows: &[bool], disabled: &[usize]) -> Menu<()> {
    let mut menu = Menu::new("Generated");
    for (index, &is_option) in rows.iter().enumerate() {
        if is_option {
            menu.add_option(format!("Option {index}"), SystemCommand::DisableClose)
                .unwrap();
        } else {
            menu.add_line(format!("Line {index}"));
        }
    }
    for &index in disabled {
        if index < rows.len() {
            menu.set_widget_enabled(index, false).unwrap();
        }
    }
    menu
}

fn selector_menu(len: usize, default_index: usize) -> Menu<()> {
    let mut menu = Menu::new("Selector");
    let choices = (0..len)
        .map(|i| Choice::new(format!("Choice {i}"), i as i64))
        .collect();
    menu.add_selector("Pick", choices, default_index, None, None, Params::new())
        .unwrap();
    menu
}

proptest! {
    #[test]
    fn focus_cycles_back_after_one_lap(
        rows in prop::collection::vec(any::<bool>(), 1..12),
        disabled in prop::collection::vec(0usize..12, 0..4),
        up in any::<bool>(),
    ) {
        let mut menu = menu_from(&rows, &disabled);
        let focusable = menu.widgets().iter().filter(|w| w.is_focusable()).count();
        prop_assume!(focusable > 0);

        let start = menu.focused();
        prop_assert!(start.is_some());
        let direction = if up { FocusDirection::Up } else { FocusDirection::Down };
        for _ in 0..focusable {
            menu.move_focus(direction);
            let focused = menu.focused_widget();
            prop_assert!(focused.is_some_and(|w| w.is_focusable()));
        }
        prop_assert_eq!(menu.focused(), start);
    }

    #[test]
    fn selector_wraps_after_k_steps(len in 1usize..10, default_seed in any::<usize>()) {
        let default_index = default_seed % len;
        let mut menu = selector_menu(len, default_index);

        for _ in 0..len {
            menu.move_focused_selector(SelectDirection::Right, &mut ()).unwrap();
        }
        prop_assert_eq!(menu.widgets()[0].selected_index(), Some(default_index));

        menu.move_focused_selector(SelectDirection::Left, &mut ()).unwrap();
        menu.move_focused_selector(SelectDirection::Right, &mut ()).unwrap();
        prop_assert_eq!(menu.widgets()[0].selected_index(), Some(default_index));
    }

    #[test]
    fn back_restores_previous_menu_and_focus(options in 1usize..6, moves in 0usize..10) {
        let mut sub: Menu<()> = Menu::new("Sub");
        sub.add_option("Return", SystemCommand::Back).unwrap();

        let mut controller = MenuController::new(Menu::new("Root"));
        let sub = controller.add_menu(sub);
        let root = controller.menu_mut(MenuId::ROOT).unwrap();
        for i in 0..options {
            root.add_option(format!("Enter {i}"), sub).unwrap();
        }
        controller.enable();

        for _ in 0..moves {
            let _ = controller.handle_event(MenuInput::Down, &mut ()).unwrap();
        }
        let focus_before = controller.active_menu().focused();

        let _ = controller.handle_event(MenuInput::Accept, &mut ()).unwrap();
        prop_assert_eq!(controller.top(), sub);
        let _ = controller.handle_event(MenuInput::Accept, &mut ()).unwrap();

        prop_assert_eq!(controller.top(), MenuId::ROOT);
        prop_assert_eq!(controller.active_menu().focused(), focus_before);
    }

    #[test]
    fn disable_close_never_changes_stack(
        inputs in prop::collection::vec(
            prop_oneof![Just(MenuInput::Close), Just(MenuInput::Up), Just(MenuInput::Down)],
            0..20,
        ),
    ) {
        let mut locked: Menu<()> = Menu::new("Locked").with_on_close(SystemCommand::DisableClose);
        locked.add_line("Nothing to see");

        let mut controller = MenuController::new(Menu::new("Root"));
        let locked = controller.add_menu(locked);
        controller.push_sub_menu(locked).unwrap();
        controller.enable();

        for input in inputs {
            let _ = controller.handle_event(input, &mut ()).unwrap();
            prop_assert_eq!(controller.stack(), &[MenuId::ROOT, locked]);
        }
    }

    #[test]
    fn reset_returns_to_root_from_any_depth(depth in 1usize..8) {
        let mut controller: MenuController<()> = MenuController::new(Menu::new("Root"));
        let mut parent = MenuId::ROOT;
        for level in 0..depth {
            let id = controller.add_menu(
                Menu::new(format!("Level {level}")).with_on_close(SystemCommand::Reset),
            );
            controller.menu_mut(parent).unwrap().add_option("Deeper", id).unwrap();
            parent = id;
        }
        controller.enable();

        for _ in 0..depth {
            let _ = controller.handle_event(MenuInput::Accept, &mut ()).unwrap();
        }
        prop_assert_eq!(controller.depth(), depth);

        let _ = controller.handle_event(MenuInput::Close, &mut ()).unwrap();
        prop_assert_eq!(controller.stack(), &[MenuId::ROOT]);
    }
}
