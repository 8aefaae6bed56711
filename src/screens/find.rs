//! Find-customer screen
//!
//! Three independent search panels: general (customer id, email, phone),
//! card number and loan account number. Each panel owns its own progress
//! flag, error and results; a failure in one never touches the others.

use crate::core::service::CustomerService;
use crate::core::validation::{validate_card_search, validate_general_search, validate_loan_search};
use crate::types::{ClientError, Criteria, Customer, ValidationErrors};

/// Which of the three panels a [`SearchPanel`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Customer,
    Card,
    Loan,
}

impl PanelKind {
    /// Prefix of this panel's error message
    pub fn error_prefix(&self) -> &'static str {
        match self {
            PanelKind::Customer => "An error occurred during search:",
            PanelKind::Card => "An error occurred during card search:",
            PanelKind::Loan => "An error occurred during loan search:",
        }
    }
}

/// View state of one search panel
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPanel {
    kind: PanelKind,
    pub searching: bool,
    /// Set once a search passed validation; drives the "no results" message
    pub attempted: bool,
    pub error: Option<String>,
    pub results: Vec<Customer>,
    /// Rules that blocked the last submit; nothing was sent
    pub validation: Option<ValidationErrors>,
}

impl SearchPanel {
    pub fn new(kind: PanelKind) -> Self {
        SearchPanel {
            kind,
            searching: false,
            attempted: false,
            error: None,
            results: Vec::new(),
            validation: None,
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Record the validation outcome; returns true when the search may run
    fn admit(&mut self, outcome: Result<(), ValidationErrors>) -> bool {
        match outcome {
            Ok(()) => {
                self.validation = None;
                true
            }
            Err(errors) => {
                self.validation = Some(errors);
                false
            }
        }
    }

    fn begin(&mut self) {
        self.searching = true;
        self.attempted = true;
        self.error = None;
    }

    fn finish(&mut self, result: Result<Vec<Customer>, ClientError>) {
        self.searching = false;
        match result {
            Ok(results) => self.results = results,
            Err(e) => {
                self.results = Vec::new();
                self.error = Some(format!("{} {}", self.kind.error_prefix(), e));
            }
        }
    }

    fn clear(&mut self) {
        *self = SearchPanel::new(self.kind);
    }

    /// True when a search ran and found nothing
    pub fn shows_no_results(&self) -> bool {
        self.attempted && !self.searching && self.error.is_none() && self.results.is_empty()
    }
}

/// Form inputs and panel state of the find-customer screen
#[derive(Debug, Clone, PartialEq)]
pub struct FindCustomerScreen {
    pub criteria: Criteria,
    pub card_number: String,
    pub loan_number: String,
    pub customer: SearchPanel,
    pub card: SearchPanel,
    pub loan: SearchPanel,
}

impl FindCustomerScreen {
    pub fn new() -> Self {
        FindCustomerScreen {
            criteria: Criteria::new(),
            card_number: String::new(),
            loan_number: String::new(),
            customer: SearchPanel::new(PanelKind::Customer),
            card: SearchPanel::new(PanelKind::Card),
            loan: SearchPanel::new(PanelKind::Loan),
        }
    }

    pub async fn search_customers(&mut self, service: &CustomerService) {
        if !self.customer.admit(validate_general_search(&self.criteria)) {
            return;
        }
        self.customer.begin();
        let result = service.search_customers(&self.criteria).await;
        self.customer.finish(result);
    }

    pub async fn search_card(&mut self, service: &CustomerService) {
        if !self.card.admit(validate_card_search(&self.card_number)) {
            return;
        }
        self.card.begin();
        let result = service.search_by_card(&self.card_number).await;
        self.card.finish(result);
    }

    pub async fn search_loan(&mut self, service: &CustomerService) {
        if !self.loan.admit(validate_loan_search(&self.loan_number)) {
            return;
        }
        self.loan.begin();
        let result = service.search_by_loan(&self.loan_number).await;
        self.loan.finish(result);
    }

    pub fn clear_customer(&mut self) {
        self.criteria = Criteria::new();
        self.customer.clear();
    }

    pub fn clear_card(&mut self) {
        self.card_number.clear();
        self.card.clear();
    }

    pub fn clear_loan(&mut self) {
        self.loan_number.clear();
        self.loan.clear();
    }
}

impl Default for FindCustomerScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{sample_customers, OfflineBackend, SimulatedBackend, DEFAULT_BASE_URL};
    use crate::types::CustomerField;
    use chrono::NaiveDate;

    fn sample_service() -> CustomerService {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        CustomerService::new(
            Box::new(SimulatedBackend::new(
                sample_customers(today),
                Box::new(OfflineBackend),
            )),
            DEFAULT_BASE_URL,
        )
    }

    fn ids(panel: &SearchPanel) -> Vec<&str> {
        panel.results.iter().map(|c| c.customer_id.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_general_search_fills_only_its_panel() {
        let service = sample_service();
        let mut screen = FindCustomerScreen::new();
        screen.criteria.insert(CustomerField::PhoneNo, "555-555");

        screen.search_customers(&service).await;

        assert_eq!(ids(&screen.customer), vec!["3"]);
        assert!(screen.customer.attempted);
        assert!(!screen.customer.searching);
        assert_eq!(screen.card, SearchPanel::new(PanelKind::Card));
        assert_eq!(screen.loan, SearchPanel::new(PanelKind::Loan));
    }

    #[tokio::test]
    async fn test_blank_general_search_is_blocked() {
        let service = sample_service();
        let mut screen = FindCustomerScreen::new();
        screen.criteria.insert(CustomerField::CustomerId, "");

        screen.search_customers(&service).await;

        assert!(!screen.customer.attempted);
        assert!(screen
            .customer
            .validation
            .as_ref()
            .is_some_and(|v| v.has_field(CustomerField::CustomerId)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exact_searches() {
        let service = sample_service();
        let mut screen = FindCustomerScreen::new();
        screen.card_number = "4242-4242-4242-4242".to_string();
        screen.loan_number = "LN-10".to_string();

        screen.search_card(&service).await;
        screen.search_loan(&service).await;

        assert_eq!(ids(&screen.card), vec!["1"]);
        assert!(screen.loan.shows_no_results());
    }

    #[tokio::test]
    async fn test_errors_stay_in_their_panel() {
        let service = CustomerService::new(Box::new(OfflineBackend), DEFAULT_BASE_URL);
        let mut screen = FindCustomerScreen::new();
        screen.card_number = "4242".to_string();
        screen.loan_number = "LN-1".to_string();

        screen.search_card(&service).await;

        assert_eq!(
            screen.card.error.as_deref(),
            Some("An error occurred during card search: Server returned HTTP 0: Unknown Error")
        );
        assert_eq!(screen.customer.error, None);
        assert_eq!(screen.loan.error, None);

        screen.search_loan(&service).await;
        assert_eq!(
            screen.loan.error.as_deref(),
            Some("An error occurred during loan search: Server returned HTTP 0: Unknown Error")
        );

        screen.clear_card();
        assert_eq!(screen.card.error, None);
        assert!(screen.card_number.is_empty());
        assert!(screen.loan.error.is_some());
    }

    #[tokio::test]
    async fn test_general_search_error_message() {
        let service = CustomerService::new(Box::new(OfflineBackend), DEFAULT_BASE_URL);
        let mut screen = FindCustomerScreen::new();
        screen.criteria.insert(CustomerField::EmailId, "jane.smith@example.com");

        screen.search_customers(&service).await;

        assert_eq!(
            screen.customer.error.as_deref(),
            Some("An error occurred during search: Server returned HTTP 0: Unknown Error")
        );
        assert!(!screen.customer.shows_no_results());
    }
}
