pub mod early_access;

use ovault_sdk::objects::early_access::FormType as SdkFormType;

/// Form type for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `ovault_sdk::objects::early_access::FormType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "form_type")]
pub enum FormType {
    Savings,
    Investment,
}

impl From<FormType> for SdkFormType {
    fn from(value: FormType) -> Self {
        match value {
            FormType::Savings => SdkFormType::Savings,
            FormType::Investment => SdkFormType::Investment,
        }
    }
}

impl From<SdkFormType> for FormType {
    fn from(value: SdkFormType) -> Self {
        match value {
            SdkFormType::Savings => FormType::Savings,
            SdkFormType::Investment => FormType::Investment,
        }
    }
}
