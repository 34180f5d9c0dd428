//! Ordered textual rewrites applied to generated source files.
//!
//! The generator's output is adapted to the host project with a small set of
//! regex rules. Rules are tied to the exact text `typescript-axios` emits, so
//! they are kept together here, independent from the pipeline, and each one
//! reports how many places it rewrote.

use std::path::Path;

use regex::{NoExpand, Regex};
use tokio::fs;

use crate::core::error::{Error, Result};

/// Primary API module produced by the `typescript-axios` generator
pub const API_CLIENT_FILE: &str = "api.ts";

/// A single pattern → literal replacement rule
#[derive(Debug, Clone)]
pub struct PatchRule {
    pub name: &'static str,
    pub pattern: Regex,
    /// Inserted verbatim; `$` has no special meaning
    pub replacement: String,
}

impl PatchRule {
    pub fn new(name: &'static str, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }
}

/// Per-rule match counts from one application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub counts: Vec<(&'static str, usize)>,
}

impl PatchReport {
    pub fn count(&self, name: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(rule, _)| *rule == name)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// An ordered list of rules; later rules see the output of earlier ones
#[derive(Debug, Clone, Default)]
pub struct PatchSet {
    rules: Vec<PatchRule>,
}

impl PatchSet {
    pub fn new(rules: Vec<PatchRule>) -> Self {
        Self { rules }
    }

    /// Rules adapting `typescript-axios` output to the host project.
    ///
    /// `base_url_env` names the runtime environment variable the client reads
    /// its base URL from instead of the generated literal.
    pub fn typescript_axios(base_url_env: &str) -> Result<Self> {
        if base_url_env.is_empty()
            || !base_url_env
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::config(format!(
                "'{base_url_env}' is not a valid environment variable name"
            )));
        }

        Ok(Self::new(vec![
            PatchRule::new(
                "base-path",
                r"const BASE_PATH[^\r\n]+",
                format!(r#"const BASE_PATH = `${{process.env.{base_url_env}}}`.replace(/\/+$/, "");"#),
            )?,
            PatchRule::new(
                "optional-configuration",
                r"protected configuration: Configuration;",
                "protected configuration?: Configuration;",
            )?,
            PatchRule::new(
                "required-error-body",
                r#"export class RequiredError extends Error[ \t]*\{?[ \t]*\r?\n[^\n]*name: "RequiredError"[^\n]*"#,
                "export class RequiredError extends Error {",
            )?,
            PatchRule::new(
                "url-search-reset",
                r"delete localVarUrlObj\.search;",
                "localVarUrlObj.search = null;",
            )?,
        ]))
    }

    pub fn rules(&self) -> &[PatchRule] {
        &self.rules
    }

    /// Apply every rule in order to `source`
    pub fn apply(&self, source: &str) -> (String, PatchReport) {
        let mut text = source.to_string();
        let mut report = PatchReport::default();

        for rule in &self.rules {
            let count = rule.pattern.find_iter(&text).count();
            if count == 0 {
                tracing::debug!(rule = rule.name, "Patch rule matched nothing");
            } else {
                text = rule
                    .pattern
                    .replace_all(&text, NoExpand(&rule.replacement))
                    .into_owned();
                tracing::debug!(rule = rule.name, count, "Patch rule applied");
            }
            report.counts.push((rule.name, count));
        }

        (text, report)
    }

    /// Rewrite `path` in place; the file must already exist
    pub async fn apply_to_file(&self, path: &Path) -> Result<PatchReport> {
        if !fs::try_exists(path).await? {
            return Err(Error::Patch(format!(
                "The file {} does not exist",
                path.display()
            )));
        }

        let source = fs::read_to_string(path).await?;
        let (patched, report) = self.apply(&source);
        if patched != source {
            fs::write(path, patched).await?;
        }

        tracing::info!(
            path = %path.display(),
            rewrites = report.total(),
            "Patched generated source"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    const GENERATED_API_TS: &str = r#"import globalImportUrl from 'url';
import { Configuration } from './configuration';
import globalAxios, { AxiosPromise, AxiosInstance } from 'axios';

const BASE_PATH = "https://api.example.com".replace(/\/+$/, "");

export class BaseAPI {
    protected configuration: Configuration;

    constructor(configuration?: Configuration, protected basePath: string = BASE_PATH, protected axios: AxiosInstance = globalAxios) {
    }
};

export class RequiredError extends Error {
    name: "RequiredError"
    constructor(public field: string, msg?: string) {
        super(msg);
    }
}

export const PetsApiAxiosParamCreator = function (configuration?: Configuration) {
    return {
        listPets(options: any = {}): RequestArgs {
            const localVarUrlObj = globalImportUrl.parse(localVarPath, true);
            localVarUrlObj.query = {...localVarUrlObj.query, ...localVarQueryParameter, ...options.query};
            delete localVarUrlObj.search;
            return { url: globalImportUrl.format(localVarUrlObj), options: localVarRequestOptions };
        },
        getPet(id: string, options: any = {}): RequestArgs {
            const localVarUrlObj = globalImportUrl.parse(localVarPath, true);
            delete localVarUrlObj.search;
            return { url: globalImportUrl.format(localVarUrlObj), options: localVarRequestOptions };
        },
    }
};
"#;

    fn rules() -> PatchSet {
        PatchSet::typescript_axios("NEXT_PUBLIC_API_URL").unwrap()
    }

    #[test]
    fn test_all_rules_applied() {
        let (patched, report) = rules().apply(GENERATED_API_TS);

        assert!(patched.contains(
            r#"const BASE_PATH = `${process.env.NEXT_PUBLIC_API_URL}`.replace(/\/+$/, "");"#
        ));
        assert!(!patched.contains("https://api.example.com"));
        assert!(patched.contains("protected configuration?: Configuration;"));
        assert!(patched.contains(
            "export class RequiredError extends Error {\n    constructor(public field: string"
        ));
        assert!(!patched.contains(r#"name: "RequiredError""#));
        assert!(!patched.contains("delete localVarUrlObj.search;"));
        assert_eq!(patched.matches("localVarUrlObj.search = null;").count(), 2);

        assert_eq!(report.count("base-path"), Some(1));
        assert_eq!(report.count("optional-configuration"), Some(1));
        assert_eq!(report.count("required-error-body"), Some(1));
        assert_eq!(report.count("url-search-reset"), Some(2));
        assert_eq!(report.total(), 5);
    }

    #[test]
    fn test_rules_run_in_declared_order() {
        let names: Vec<_> = rules().rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "base-path",
                "optional-configuration",
                "required-error-body",
                "url-search-reset"
            ]
        );
    }

    #[test]
    fn test_required_error_with_initializer() {
        let source = "export class RequiredError extends Error {\n    name: \"RequiredError\" = \"RequiredError\";\n    constructor() {}\n}\n";
        let (patched, _) = rules().apply(source);
        assert_eq!(
            patched,
            "export class RequiredError extends Error {\n    constructor() {}\n}\n"
        );
    }

    #[test]
    fn test_patching_is_idempotent() {
        let (once, _) = rules().apply(GENERATED_API_TS);
        let (twice, report) = rules().apply(&once);

        assert_eq!(once, twice);
        // base-path re-matches its own output and rewrites it identically
        assert_eq!(report.count("base-path"), Some(1));
        assert_eq!(report.count("optional-configuration"), Some(0));
        assert_eq!(report.count("required-error-body"), Some(0));
        assert_eq!(report.count("url-search-reset"), Some(0));
    }

    #[test]
    fn test_dollar_signs_are_literal() {
        let set = PatchSet::typescript_axios("API_URL").unwrap();
        let (patched, _) = set.apply("const BASE_PATH = \"x\";\n");
        assert_eq!(
            patched,
            "const BASE_PATH = `${process.env.API_URL}`.replace(/\\/+$/, \"\");\n"
        );
    }

    #[test]
    #[traced_test]
    fn test_unmatched_source_passes_through() {
        let source = "export const answer = 42;\n";
        let (patched, report) = rules().apply(source);
        assert_eq!(patched, source);
        assert_eq!(report.total(), 0);
        assert!(logs_contain("Patch rule matched nothing"));
    }

    #[test]
    fn test_invalid_env_var_name_rejected() {
        assert!(PatchSet::typescript_axios("").is_err());
        assert!(PatchSet::typescript_axios("process.env.X").is_err());
        assert!(PatchSet::typescript_axios("MY-URL").is_err());
    }

    #[tokio::test]
    async fn test_apply_to_file_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let api = dir.path().join(API_CLIENT_FILE);
        let other = dir.path().join("base.ts");
        std::fs::write(&api, GENERATED_API_TS).unwrap();
        std::fs::write(&other, "delete localVarUrlObj.search;\n").unwrap();

        let report = rules().apply_to_file(&api).await.unwrap();

        assert_eq!(report.total(), 5);
        let content = std::fs::read_to_string(&api).unwrap();
        assert!(content.contains("process.env.NEXT_PUBLIC_API_URL"));
        // sibling files are left alone
        assert_eq!(
            std::fs::read_to_string(&other).unwrap(),
            "delete localVarUrlObj.search;\n"
        );
    }

    #[tokio::test]
    async fn test_apply_to_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("base.ts"), "export {};\n").unwrap();

        let err = rules()
            .apply_to_file(&dir.path().join(API_CLIENT_FILE))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Patch(_)));
        assert!(err.to_string().contains("does not exist"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("base.ts")).unwrap(),
            "export {};\n"
        );
    }
}
