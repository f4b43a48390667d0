/// Focusable fields of the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub loading: bool,
}

impl LoginForm {
    pub fn focus_next(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn focused_text_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Credentials for submission; `None` (and no request) when a field is
    /// empty.
    pub fn credentials(&self) -> Option<(String, String)> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return None;
        }
        Some((self.email.trim().to_string(), self.password.clone()))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// Why a registration submission was rejected before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    MissingFields,
    PasswordMismatch,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub field: RegisterField,
    pub loading: bool,
}

impl RegisterForm {
    pub fn focus_next(&mut self) {
        self.field = match self.field {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::ConfirmPassword,
            RegisterField::ConfirmPassword => RegisterField::Username,
        };
    }

    pub fn focused_text_mut(&mut self) -> &mut String {
        match self.field {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn credentials(&self) -> Result<(String, String, String), RegisterError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(RegisterError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(RegisterError::PasswordMismatch);
        }
        Ok((
            self.username.trim().to_string(),
            self.email.trim().to_string(),
            self.password.clone(),
        ))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
