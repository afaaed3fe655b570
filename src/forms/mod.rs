//! The built-in form definitions.

use lazy_static::lazy_static;

use crate::schema::FormSchema;

mod application;
pub mod catalog;
mod contact;

lazy_static! {
    static ref APPLICATION: FormSchema = application::schema();
    static ref CONTACT: FormSchema = contact::schema();
}

/// The current application form.
pub fn application() -> FormSchema {
    APPLICATION.clone()
}

/// The current contact form.
pub fn contact() -> FormSchema {
    CONTACT.clone()
}
