/// ReportRequest - configuration of one report pass
///
/// Tree-shaping settings come from the validate pass. The only one the
/// caller may state is `skip_optionals`, and it must then agree with the
/// persisted value.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub skip_optionals: Option<bool>,
}

impl ReportRequest {
    pub fn new(skip_optionals: Option<bool>) -> Self {
        Self { skip_optionals }
    }
}
