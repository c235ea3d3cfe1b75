use super::schema::Config;

const MAX_HISTOGRAM_BINS: usize = 200;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.data.path.as_os_str().is_empty() {
        errors.push("data.path: must not be empty".to_string());
    }

    if config.data.sheet.trim().is_empty() {
        errors.push("data.sheet: must not be empty".to_string());
    }

    if config.data.id_column.trim().is_empty() {
        errors.push("data.id_column: must not be empty".to_string());
    }

    if config.dashboard.top_n == 0 {
        errors.push("dashboard.top_n: must be at least 1".to_string());
    }

    let bins = config.dashboard.histogram_bins;
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        errors.push(format!(
            "dashboard.histogram_bins: must be between 1 and {} (got {})",
            MAX_HISTOGRAM_BINS, bins
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_top_n() {
        let mut config = Config::default();
        config.dashboard.top_n = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("dashboard.top_n"));
    }

    #[test]
    fn test_too_many_bins() {
        let mut config = Config::default();
        config.dashboard.histogram_bins = 500;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("histogram_bins"));
        assert!(errors[0].contains("500"));
    }

    #[test]
    fn test_blank_sheet() {
        let mut config = Config::default();
        config.data.sheet = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("data.sheet"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.data.id_column = String::new(); // Error 1
        config.dashboard.top_n = 0; // Error 2
        config.dashboard.histogram_bins = 0; // Error 3
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
