//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data rather than match arms so users can remap any action
//! from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    ApplyFilter,
    NextPage,
    PreviousPage,
    CycleTheme,
    ShowHelp,
    Back,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Move down",
            Self::NavUp => "Move up",
            Self::CycleFocus => "Switch between filter and articles",
            Self::ApplyFilter => "Apply highlighted category",
            Self::NextPage => "Next page",
            Self::PreviousPage => "Previous page",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::Back => "Close overlay",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context. Determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Filter,
    Articles,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report `T` as `Char('T')` + SHIFT; the case already carries
    /// the shift, so drop it for character keys.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) => {
                Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT))
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "n", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Left", "Right", "Space"
/// - Modifier combos: "Ctrl+n"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then(|| KeySpec::ctrl(c));
    }

    // Named keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    // Function keys
    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        if (1..=12).contains(&n) {
            return Some(KeySpec::plain(KeyCode::F(n)));
        }
    }

    // Single character
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then(|| KeySpec::plain(KeyCode::Char(c)))
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// try the focused context first and fall back to Global.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    /// Create a registry with the default bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;

        let global = [
            (Char('q'), Action::Quit),
            (Char('j'), Action::NavDown),
            (Down, Action::NavDown),
            (Char('k'), Action::NavUp),
            (Up, Action::NavUp),
            (Tab, Action::CycleFocus),
            (Char('n'), Action::NextPage),
            (Right, Action::NextPage),
            (Char('p'), Action::PreviousPage),
            (Left, Action::PreviousPage),
            (Char('T'), Action::CycleTheme),
            (Char('?'), Action::ShowHelp),
            (Esc, Action::Back),
        ];
        for (code, action) in global {
            self.bind(Context::Global, KeySpec::plain(code), action);
        }

        // Applying a category only makes sense with the selector focused
        self.bind(Context::Filter, KeySpec::plain(Enter), Action::ApplyFilter);
        self.bind(
            Context::Filter,
            KeySpec::plain(Char(' ')),
            Action::ApplyFilter,
        );
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "next_page").
    /// Values are key strings (e.g., "q", "Ctrl+n", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names, unparseable
    /// keys, and keys already taken by another action. Conflicting overrides
    /// are skipped so an existing binding (such as Quit) can't be displaced.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        // Sorted so warnings and rebinds are deterministic
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        for (action_name, key_str) in entries {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            // Re-bind in every context where the action was bound
            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            if let Some(taken_by) = self.conflicting_action(&contexts, key, action) {
                warnings.push(format!(
                    "Key '{}' for action '{}' is already bound to '{}', ignoring",
                    key_str,
                    action_name,
                    taken_by.describe()
                ));
                continue;
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Another action reachable through `key` in any of `contexts`.
    ///
    /// Global bindings are visible from every context and context bindings
    /// shadow Global ones, so both directions count as a conflict.
    fn conflicting_action(
        &self,
        contexts: &[Context],
        key: KeySpec,
        action: Action,
    ) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(ctx, k, a)| {
                *k == key
                    && *a != action
                    && contexts
                        .iter()
                        .any(|c| c == ctx || *c == Context::Global || *ctx == Context::Global)
            })
            .map(|(_, _, a)| *a)
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "cycle_focus" | "cyclefocus" | "focus" => Some(Action::CycleFocus),
        "apply_filter" | "applyfilter" | "select" => Some(Action::ApplyFilter),
        "next_page" | "nextpage" | "next" => Some(Action::NextPage),
        "previous_page" | "previouspage" | "prev_page" | "previous" => {
            Some(Action::PreviousPage)
        }
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        "back" => Some(Action::Back),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        let action = reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global);
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_default_page_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('n'), KeyModifiers::NONE, Context::Articles),
            Some(Action::NextPage)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Right, KeyModifiers::NONE, Context::Filter),
            Some(Action::NextPage)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('p'), KeyModifiers::NONE, Context::Articles),
            Some(Action::PreviousPage)
        );
    }

    #[test]
    fn test_apply_filter_only_in_filter_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Filter),
            Some(Action::ApplyFilter)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Articles),
            None
        );
    }

    #[test]
    fn test_shifted_char_matches_uppercase_binding() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Global),
            Some(Action::CycleTheme)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::F(12), KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        // Old binding should be gone
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            None
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_keeps_context() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("apply_filter".to_string(), "F2".to_string());
        reg.apply_overrides(&overrides);

        assert_eq!(
            reg.action_for_key(KeyCode::F(2), KeyModifiers::NONE, Context::Filter),
            Some(Action::ApplyFilter)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::F(2), KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_apply_overrides_warnings() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("fly".to_string(), "f".to_string());
        overrides.insert("quit".to_string(), "Hyper+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Unknown action 'fly'"));
        assert!(warnings[1].contains("Cannot parse key"));
    }

    #[test]
    fn test_override_onto_taken_key_is_rejected() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("next_page".to_string(), "q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("already bound to 'Quit application'"));

        // q still quits from every context, n still pages
        for ctx in [Context::Global, Context::Filter, Context::Articles] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, ctx),
                Some(Action::Quit)
            );
        }
        assert_eq!(
            reg.action_for_key(KeyCode::Char('n'), KeyModifiers::NONE, Context::Global),
            Some(Action::NextPage)
        );

        let on_q: Vec<Action> = reg
            .all_bindings()
            .into_iter()
            .filter(|(_, key, _, _)| key == "q")
            .map(|(_, _, action, _)| action)
            .collect();
        assert_eq!(on_q, vec![Action::Quit]);
    }

    #[test]
    fn test_override_shadowing_global_key_is_rejected() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("apply_filter".to_string(), "q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Filter),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Filter),
            Some(Action::ApplyFilter)
        );
    }

    #[test]
    fn test_override_onto_own_key_is_allowed() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "q".to_string());

        assert!(reg.apply_overrides(&overrides).is_empty());
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_parse_key_string_formats() {
        assert_eq!(parse_key_string("x"), Some(KeySpec::plain(KeyCode::Char('x'))));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+ab"), None);
        assert_eq!(parse_key_string(""), None);
    }

    #[test]
    fn test_all_bindings_describes_every_entry() {
        let reg = KeybindingRegistry::new();
        let all = reg.all_bindings();
        assert!(all
            .iter()
            .any(|(ctx, key, action, _)| *ctx == Context::Filter
                && key == "Enter"
                && *action == Action::ApplyFilter));
        assert!(all.iter().all(|(_, _, _, desc)| !desc.is_empty()));
    }
}
