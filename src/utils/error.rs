use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Insufficient fuel for {id}: needed {needed:.2} L, available {available:.2} L")]
    InsufficientFuel {
        id: String,
        needed: f64,
        available: f64,
    },

    #[error("Overload: {message}")]
    Overload { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed record '{line}': {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FleetError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        FleetError::InvalidOperation {
            message: message.into(),
        }
    }

    pub fn overload(message: impl Into<String>) -> Self {
        FleetError::Overload {
            message: message.into(),
        }
    }

    pub fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        FleetError::MalformedRecord {
            line: line.into(),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FleetError::MalformedRecord { .. } => ErrorSeverity::Low,
            FleetError::InvalidOperation { .. }
            | FleetError::InsufficientFuel { .. }
            | FleetError::Overload { .. } => ErrorSeverity::Medium,
            FleetError::Validation { .. } | FleetError::Config { .. } => ErrorSeverity::High,
            FleetError::Io(_) | FleetError::Csv(_) | FleetError::Serialization(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FleetError::InvalidOperation { .. } => {
                "Check the vehicle id and that the amount or distance is positive"
            }
            FleetError::InsufficientFuel { .. } => "Refuel the vehicle before starting the journey",
            FleetError::Overload { .. } => "Unload passengers or cargo, or pick a larger vehicle",
            FleetError::Validation { .. } => "Correct the highlighted value and retry",
            FleetError::MalformedRecord { .. } => "Fix or remove the offending line in the fleet file",
            FleetError::Config { .. } => "Check the TOML configuration file",
            FleetError::Io(_) => "Check that the fleet file path exists and is writable",
            FleetError::Csv(_) => "Check that the fleet file is valid comma-separated text",
            FleetError::Serialization(_) => "Report output could not be encoded",
        }
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_by_kind() {
        assert_eq!(
            FleetError::invalid_operation("x").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            FleetError::malformed("Boat,1", "unknown type").severity(),
            ErrorSeverity::Low
        );
        let io = FleetError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_insufficient_fuel_message() {
        let err = FleetError::InsufficientFuel {
            id: "C-001".to_string(),
            needed: 10.0,
            available: 2.5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient fuel for C-001: needed 10.00 L, available 2.50 L"
        );
    }
}
