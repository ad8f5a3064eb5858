//! Company letterhead configuration.
//!
//! Four display values printed at the top of every invoice. Each one is
//! independently optional and resolved from the environment; deployments
//! without any configuration fall back to the stock letterhead.

use std::env;

pub const ENV_COMPANY_NAME: &str = "INVOICE_COMPANY_NAME";
pub const ENV_COMPANY_PHONE: &str = "INVOICE_COMPANY_PHONE";
pub const ENV_COMPANY_ADDRESS: &str = "INVOICE_COMPANY_ADDRESS";
pub const ENV_COMPANY_LOGO_URL: &str = "INVOICE_COMPANY_LOGO_URL";

#[derive(Debug, Clone)]
pub struct CompanyProfile {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "مؤسسة الطباعة والتصميم".to_string(),
            phone: None,
            address: None,
            logo_url: None,
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CompanyProfile {
    /// Resolve the profile from `INVOICE_COMPANY_*` environment variables,
    /// keeping the default for every variable that is unset or blank.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env_value(ENV_COMPANY_NAME).unwrap_or(defaults.name),
            phone: env_value(ENV_COMPANY_PHONE).or(defaults.phone),
            address: env_value(ENV_COMPANY_ADDRESS).or(defaults.address),
            logo_url: env_value(ENV_COMPANY_LOGO_URL).or(defaults.logo_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            ENV_COMPANY_NAME,
            ENV_COMPANY_PHONE,
            ENV_COMPANY_ADDRESS,
            ENV_COMPANY_LOGO_URL,
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn unset_environment_yields_defaults() {
        clear_env();
        let profile = CompanyProfile::from_env();
        assert_eq!(profile.name, CompanyProfile::default().name);
        assert!(profile.phone.is_none());
        assert!(profile.logo_url.is_none());
    }

    #[test]
    #[serial]
    fn each_variable_is_independently_optional() {
        clear_env();
        env::set_var(ENV_COMPANY_PHONE, "02-1234567");
        env::set_var(ENV_COMPANY_NAME, "  مطبعة الحي  ");
        let profile = CompanyProfile::from_env();
        assert_eq!(profile.name, "مطبعة الحي");
        assert_eq!(profile.phone.as_deref(), Some("02-1234567"));
        assert!(profile.address.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn blank_variable_is_treated_as_unset() {
        clear_env();
        env::set_var(ENV_COMPANY_ADDRESS, "   ");
        let profile = CompanyProfile::from_env();
        assert!(profile.address.is_none());
        clear_env();
    }
}
