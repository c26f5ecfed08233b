use metrics::counter;

/// Result of one verification request, as exported on `/metrics`.
#[derive(Debug, Clone, Copy)]
pub enum VerificationOutcome {
    Verified,
    NotFound,
    Rejected,
    UpstreamError,
}

impl VerificationOutcome {
    fn as_label(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::NotFound => "not_found",
            Self::Rejected => "rejected",
            Self::UpstreamError => "upstream_error",
        }
    }
}

pub fn record_verification(outcome: VerificationOutcome) {
    counter!("payment_verifications_total", "outcome" => outcome.as_label()).increment(1);
}
