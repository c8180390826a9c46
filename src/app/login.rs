//! Login screen state

use crate::focus::{Direction, FocusPolicy, FocusableList, ListLayout, Navigable, SelectionEvent};

use super::Intent;

/// Single-line text input with a cursor
#[derive(Debug, Clone, Default)]
pub struct TextField {
    /// Current text
    pub value: String,
    /// Cursor position, in chars
    pub cursor: usize,
}

impl TextField {
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Value with every char masked
    pub fn masked(&self) -> String {
        "*".repeat(self.len())
    }
}

/// Focus stops on the Login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Submit,
    Guest,
}

impl LoginField {
    pub fn is_text(self) -> bool {
        matches!(self, LoginField::Email | LoginField::Password)
    }
}

impl Navigable for LoginField {
    fn key(&self) -> &str {
        match self {
            LoginField::Email => "email",
            LoginField::Password => "password",
            LoginField::Submit => "submit",
            LoginField::Guest => "guest",
        }
    }
}

fn press(field: &LoginField, _: &SelectionEvent) -> Intent {
    Intent::Login(*field)
}

#[derive(Debug)]
pub struct LoginScreen {
    pub email: TextField,
    pub password: TextField,
    pub fields: FocusableList<LoginField, Intent>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: TextField::default(),
            password: TextField::default(),
            fields: FocusableList::new(FocusPolicy::FirstItem, press)
                .with_layout(ListLayout::Column)
                .with_items(vec![
                    LoginField::Email,
                    LoginField::Password,
                    LoginField::Submit,
                    LoginField::Guest,
                ]),
        }
    }

    pub fn focused_field(&self) -> Option<LoginField> {
        self.fields.focused_item().copied()
    }

    /// A text field has focus, so printable keys are input
    pub fn is_editing(&self) -> bool {
        self.focused_field().is_some_and(LoginField::is_text)
    }

    /// Text field under focus
    pub fn active_input(&mut self) -> Option<&mut TextField> {
        match self.focused_field()? {
            LoginField::Email => Some(&mut self.email),
            LoginField::Password => Some(&mut self.password),
            LoginField::Submit | LoginField::Guest => None,
        }
    }

    pub fn focus(&mut self, field: LoginField) {
        if let Some(index) = self.fields.position(field.key()) {
            self.fields.on_enter_focus(index);
        }
    }

    /// Email and password, if both were entered
    pub fn credentials(&self) -> Option<(String, String)> {
        let email = self.email.value.trim();
        if email.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((email.to_string(), self.password.value.clone()))
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.fields.navigate(direction)
    }

    pub fn confirm(&self) -> Option<Intent> {
        self.fields.confirm_focused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        for c in "ana@x".chars() {
            field.insert(c);
        }
        field.cursor_left();
        field.backspace();
        assert_eq!(field.value, "ana@");
        field.cursor_home();
        field.delete();
        assert_eq!(field.value, "na@");
        field.cursor_end();
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn test_text_field_multibyte() {
        let mut field = TextField::default();
        field.insert('é');
        field.insert('a');
        field.cursor_left();
        field.backspace();
        assert_eq!(field.value, "a");
        assert_eq!(field.masked(), "*");
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let mut login = LoginScreen::new();
        login.email.value = "ana@example.com".into();
        assert!(login.credentials().is_none());
        login.password.value = "secret".into();
        assert_eq!(
            login.credentials(),
            Some(("ana@example.com".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_starts_editing_email() {
        let mut login = LoginScreen::new();
        assert!(login.is_editing());
        login.focus(LoginField::Submit);
        assert!(!login.is_editing());
        assert_eq!(login.confirm(), Some(Intent::Login(LoginField::Submit)));
    }
}
