use keylet_plugin_spec::ScopeSpec;

/// Fixed top-level scope keyword for this provider.
pub const NAMESPACE: &str = "aws";

/// True when the scope names this provider's namespace, either bare or with
/// a sub-scope suffix. Suffixes are logical labels and are not enumerated:
/// unknown ones under the namespace are accepted. The degenerate `aws:`
/// also passes, a documented looseness of the prefix rule. Matching is
/// case-sensitive.
pub fn matches_namespace(scope: &str) -> bool {
    match scope.strip_prefix(NAMESPACE) {
        Some("") => true,
        Some(rest) => rest.starts_with(':'),
        None => false,
    }
}

/// Descriptive catalog of the scopes this plugin serves. Informational only;
/// [`matches_namespace`] is the gate and accepts any `aws:` suffix.
pub fn scope_specs() -> Vec<ScopeSpec> {
    [
        ("aws", "Full AWS access using the configured role"),
        (
            "aws:s3",
            "AWS S3 access (logical scope - actual permissions depend on role)",
        ),
        (
            "aws:bedrock",
            "AWS Bedrock access (logical scope - actual permissions depend on role)",
        ),
        (
            "aws:lambda",
            "AWS Lambda access (logical scope - actual permissions depend on role)",
        ),
        (
            "aws:ecr",
            "AWS ECR access (logical scope - actual permissions depend on role)",
        ),
    ]
    .into_iter()
    .map(|(pattern, description)| ScopeSpec {
        pattern: pattern.to_string(),
        description: description.to_string(),
        examples: vec![pattern.to_string()],
    })
    .collect()
}
