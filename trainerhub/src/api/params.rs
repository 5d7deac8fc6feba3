//! Query parameters accepted by the list endpoints.
//!
//! Every filter field is independently optional. Absent and empty values leave the
//! list unconstrained on that field. `limit` has no upper bound but must be positive,
//! since MongoDB reads a zero limit as "no limit".

use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use trainerhub_core::query::{Expr, Filter};

pub const DEFAULT_LIMIT: usize = 100;

/// Parameters of a list endpoint: a result limit plus an optional filter.
pub trait ListParams: DeserializeOwned + Validate + Send + 'static {
    fn limit(&self) -> Option<usize>;

    fn into_filter(self) -> Option<Expr>;

    fn effective_limit(&self) -> usize {
        self.limit().unwrap_or(DEFAULT_LIMIT)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TrainerListParams {
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
}

impl ListParams for TrainerListParams {
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn into_filter(self) -> Option<Expr> {
        None
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClientListParams {
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    pub trainer_id: Option<String>,
}

impl ListParams for ClientListParams {
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn into_filter(self) -> Option<Expr> {
        Filter::all_present([("trainer_id", present(self.trainer_id))])
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProgramListParams {
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    pub client_id: Option<String>,
    pub trainer_id: Option<String>,
}

impl ListParams for ProgramListParams {
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn into_filter(self) -> Option<Expr> {
        Filter::all_present([
            ("client_id", present(self.client_id)),
            ("trainer_id", present(self.trainer_id)),
        ])
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SessionListParams {
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    pub client_id: Option<String>,
    pub trainer_id: Option<String>,
    pub status: Option<String>,
}

impl ListParams for SessionListParams {
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn into_filter(self) -> Option<Expr> {
        Filter::all_present([
            ("client_id", present(self.client_id)),
            ("trainer_id", present(self.trainer_id)),
            ("status", present(self.status)),
        ])
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProgressListParams {
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    pub client_id: Option<String>,
}

impl ListParams for ProgressListParams {
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn into_filter(self) -> Option<Expr> {
        Filter::all_present([("client_id", present(self.client_id))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_one_hundred() {
        assert_eq!(TrainerListParams::default().effective_limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn limit_must_be_positive() {
        assert!(TrainerListParams { limit: Some(0) }.validate().is_err());
        assert!(TrainerListParams { limit: Some(1) }.validate().is_ok());
        assert!(TrainerListParams { limit: Some(2000) }.validate().is_ok());
    }

    #[test]
    fn no_filters_match_everything() {
        assert_eq!(SessionListParams::default().into_filter(), None);
    }

    #[test]
    fn empty_values_are_ignored() {
        let params = SessionListParams {
            client_id: Some(String::new()),
            status: Some("completed".to_string()),
            ..Default::default()
        };

        assert_eq!(
            params.into_filter(),
            Some(Filter::and([Filter::eq("status", "completed")])),
        );
    }

    #[test]
    fn combines_present_filters() {
        let params = ProgramListParams {
            limit: None,
            client_id: Some("c1".to_string()),
            trainer_id: Some("t1".to_string()),
        };

        assert_eq!(
            params.into_filter(),
            Some(Filter::and([
                Filter::eq("client_id", "c1"),
                Filter::eq("trainer_id", "t1"),
            ])),
        );
    }
}
