//! Helper functions for creating specific error types

use super::types::AdvisorError;

/// Helper functions for creating specific errors
impl AdvisorError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unknown_provider<S: Into<String>>(provider: S) -> Self {
        Self::UnknownProvider(provider.into())
    }

    pub fn unknown_instance<S: Into<String>>(provider: S, instance_type: S) -> Self {
        Self::UnknownInstance {
            provider: provider.into(),
            instance_type: instance_type.into(),
        }
    }

    pub fn invalid_configuration<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn no_match<S: Into<String>>(message: S) -> Self {
        Self::NoMatch(message.into())
    }

    pub fn no_data<S: Into<String>>(message: S) -> Self {
        Self::NoData(message.into())
    }

    pub fn ambiguous<S: Into<String>>(message: S) -> Self {
        Self::AmbiguousResult(message.into())
    }

    pub fn adapter<S: Into<String>>(message: S) -> Self {
        Self::Adapter(message.into())
    }

    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence(message.into())
    }

    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog(message.into())
    }
}
