//! Path templates.
//!
//! Compiles templates such as `/article/:id` or `/files/:path*` into a
//! matcher (path → params) and its inverse generator (params → path).
//!
//! # Syntax
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `:name` | one segment, `[^/]+?` |
//! | `:name(\d+)` | one segment matching a custom pattern |
//! | `:name?` | optional segment |
//! | `:name*` / `:name+` | zero-or-more / one-or-more segments |
//! | `(\d+)` | unnamed parameter, keyed `"0"`, `"1"`, ... |
//! | `*` | unnamed wildcard, `.*` |
//! | `\:` | escaped literal |
//!
//! A parameter may be introduced by a `/` or `.` prefix, which becomes
//! optional together with the parameter.

use regex::{Regex, RegexBuilder};
use std::{borrow::Cow, sync::LazyLock};
use wayfare_core::{Params, RouteError};

static TOKENIZER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\\.)|([/.])?(?:(?::(\w+)(?:\(((?:\\.|[^\\()])+)\))?|\(((?:\\.|[^\\()])+)\))([+*?])?|(\*))",
    )
    .expect("tokenizer regex is valid")
});

/// Options passed to the pattern compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Compare literal segments case-sensitively.
    pub sensitive: bool,
    /// Require the trailing slash to match exactly.
    pub strict: bool,
    /// Anchor the match at the end of the path (otherwise prefix match).
    pub end: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: false,
            end: true,
        }
    }
}

impl PatternOptions {
    /// Set case sensitivity.
    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// Set trailing-slash strictness.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set end anchoring.
    pub fn end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }
}

#[derive(Debug, Clone)]
enum Token {
    Literal(String),
    Param(ParamToken),
}

#[derive(Debug, Clone)]
struct ParamToken {
    name: String,
    group: String,
    prefix: String,
    delimiter: String,
    optional: bool,
    repeat: bool,
    partial: bool,
    asterisk: bool,
    pattern: String,
    validator: Regex,
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    options: PatternOptions,
    tokens: Vec<Token>,
    regex: Regex,
}

impl PathPattern {
    /// Compile `template` with default options.
    pub fn new(template: &str) -> Result<Self, RouteError> {
        Self::with_options(template, PatternOptions::default())
    }

    /// Compile `template`.
    pub fn with_options(template: &str, options: PatternOptions) -> Result<Self, RouteError> {
        let tokens = tokenize(template)?;
        let source = matcher_source(&tokens, options);
        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.sensitive)
            .build()
            .map_err(|e| invalid(template, e))?;

        Ok(Self {
            template: template.to_string(),
            options,
            tokens,
            regex,
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The options this pattern was compiled with.
    pub fn options(&self) -> PatternOptions {
        self.options
    }

    /// Parameter names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Param(param) => Some(param.name.as_str()),
            Token::Literal(_) => None,
        })
    }

    /// Match `path` and return the captured parameters, percent-decoded.
    ///
    /// Optional parameters that did not participate are left out.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();
        for token in &self.tokens {
            if let Token::Param(param) = token {
                if let Some(value) = captures.name(&param.group) {
                    params.insert(param.name.clone(), decode(value.as_str()));
                }
            }
        }
        Some(params)
    }

    /// Build a path from `params`.
    pub fn generate(&self, params: &Params) -> Result<String, RouteError> {
        let mut path = String::new();

        for token in &self.tokens {
            let param = match token {
                Token::Literal(text) => {
                    path.push_str(text);
                    continue;
                }
                Token::Param(param) => param,
            };

            let Some(value) = params.get(&param.name) else {
                if param.optional {
                    if param.partial {
                        path.push_str(&param.prefix);
                    }
                    continue;
                }
                return Err(self.missing(param));
            };

            if param.repeat {
                let segments: Vec<&str> = value
                    .split(param.delimiter.as_str())
                    .filter(|segment| !segment.is_empty())
                    .collect();
                if segments.is_empty() {
                    if param.optional {
                        continue;
                    }
                    return Err(self.missing(param));
                }
                for (index, segment) in segments.into_iter().enumerate() {
                    let encoded = param.check(urlencoding::encode(segment).into_owned())?;
                    path.push_str(if index == 0 {
                        &param.prefix
                    } else {
                        &param.delimiter
                    });
                    path.push_str(&encoded);
                }
                continue;
            }

            let encoded = if param.asterisk {
                urlencoding::encode(value).replace("%2F", "/")
            } else {
                urlencoding::encode(value).into_owned()
            };
            let encoded = param.check(encoded)?;
            path.push_str(&param.prefix);
            path.push_str(&encoded);
        }

        Ok(path)
    }

    fn missing(&self, param: &ParamToken) -> RouteError {
        RouteError::MissingParam {
            pattern: self.template.clone(),
            name: param.name.clone(),
        }
    }
}

impl ParamToken {
    fn check(&self, segment: String) -> Result<String, RouteError> {
        if self.validator.is_match(&segment) {
            Ok(segment)
        } else {
            Err(RouteError::InvalidParam {
                name: self.name.clone(),
                value: segment,
                expected: self.pattern.clone(),
            })
        }
    }
}

fn tokenize(template: &str) -> Result<Vec<Token>, RouteError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut index = 0;
    let mut unnamed = 0usize;

    for captures in TOKENIZER.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        literal.push_str(&template[index..whole.start()]);
        index = whole.end();

        if let Some(escaped) = captures.get(1) {
            literal.push_str(&escaped.as_str()[1..]);
            continue;
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }

        let prefix = captures.get(2).map(|m| m.as_str());
        let next = template[index..].chars().next();
        let modifier = captures.get(6).map(|m| m.as_str());
        let asterisk = captures.get(7).is_some();

        let name = match captures.get(3) {
            Some(name) => name.as_str().to_string(),
            None => {
                unnamed += 1;
                (unnamed - 1).to_string()
            }
        };
        let duplicate = tokens
            .iter()
            .any(|t| matches!(t, Token::Param(p) if p.name == name));
        if duplicate {
            return Err(RouteError::InvalidPattern {
                pattern: template.to_string(),
                reason: format!("parameter `{name}` is declared twice"),
            });
        }

        let delimiter = prefix.unwrap_or("/").to_string();
        let pattern = match captures.get(4).or_else(|| captures.get(5)) {
            Some(custom) => custom.as_str().to_string(),
            None if asterisk => ".*".to_string(),
            None => format!("[^{}]+?", regex::escape(&delimiter)),
        };
        let validator =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|e| invalid(template, e))?;

        tokens.push(Token::Param(ParamToken {
            group: format!("p{}", tokens.len()),
            name,
            prefix: prefix.unwrap_or_default().to_string(),
            partial: matches!((prefix, next), (Some(p), Some(n)) if !p.starts_with(n)),
            optional: matches!(modifier, Some("?" | "*")),
            repeat: matches!(modifier, Some("+" | "*")),
            delimiter,
            asterisk,
            pattern,
            validator,
        }));
    }

    literal.push_str(&template[index..]);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn matcher_source(tokens: &[Token], options: PatternOptions) -> String {
    let mut route = String::from("^");

    for token in tokens {
        match token {
            Token::Literal(text) => route.push_str(&regex::escape(text)),
            Token::Param(param) => {
                let prefix = regex::escape(&param.prefix);
                let mut capture = format!("(?:{})", param.pattern);
                if param.repeat {
                    capture = format!("{capture}(?:{prefix}{capture})*");
                }
                let group = format!("(?P<{}>{capture})", param.group);
                if !param.optional {
                    route.push_str(&format!("{prefix}{group}"));
                } else if param.partial {
                    route.push_str(&format!("{prefix}{group}?"));
                } else {
                    route.push_str(&format!("(?:{prefix}{group})?"));
                }
            }
        }
    }

    let ends_with_delimiter = route.len() > 1 && route.ends_with('/');
    if !options.strict {
        if ends_with_delimiter {
            route.pop();
        }
        route.push_str("(?:/)?");
    }
    if options.end {
        route.push('$');
    } else if !(options.strict && ends_with_delimiter) {
        route.push_str("(?:/|$)");
    }
    route
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| value.to_string())
}

fn invalid(template: &str, err: regex::Error) -> RouteError {
    RouteError::InvalidPattern {
        pattern: template.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_static_path() {
        let pattern = PathPattern::new("/").unwrap();
        assert_eq!(pattern.matches("/"), Some(Params::new()));
        assert_eq!(pattern.matches("/different-page"), None);
    }

    #[test]
    fn test_named_params() {
        let pattern = PathPattern::new("/:year/:month/:day").unwrap();
        assert_eq!(
            pattern.matches("/2018/05/26"),
            Some(params(&[("year", "2018"), ("month", "05"), ("day", "26")]))
        );
        assert_eq!(
            pattern.keys().collect::<Vec<_>>(),
            vec!["year", "month", "day"]
        );
    }

    #[test]
    fn test_case_sensitivity() {
        let sensitive =
            PathPattern::with_options("/about", PatternOptions::default().sensitive(true))
                .unwrap();
        assert!(sensitive.matches("/about").is_some());
        assert!(sensitive.matches("/About").is_none());

        let insensitive = PathPattern::new("/about").unwrap();
        assert!(insensitive.matches("/about").is_some());
        assert!(insensitive.matches("/About").is_some());
    }

    #[test]
    fn test_trailing_slash() {
        let loose = PathPattern::new("/about").unwrap();
        assert!(loose.matches("/about/").is_some());

        let strict =
            PathPattern::with_options("/about", PatternOptions::default().strict(true)).unwrap();
        assert!(strict.matches("/about").is_some());
        assert!(strict.matches("/about/").is_none());
    }

    #[test]
    fn test_prefix_match_without_end() {
        let pattern =
            PathPattern::with_options("/admin", PatternOptions::default().end(false)).unwrap();
        assert!(pattern.matches("/admin").is_some());
        assert!(pattern.matches("/admin/users").is_some());
        assert!(pattern.matches("/administrator").is_none());
    }

    #[test]
    fn test_custom_and_optional_params() {
        let pattern = PathPattern::new("/article/:id(\\d+)/:slug?").unwrap();
        assert_eq!(pattern.matches("/article/7"), Some(params(&[("id", "7")])));
        assert_eq!(
            pattern.matches("/article/7/hello"),
            Some(params(&[("id", "7"), ("slug", "hello")]))
        );
        assert_eq!(pattern.matches("/article/abc"), None);
    }

    #[test]
    fn test_repeated_params() {
        let pattern = PathPattern::new("/files/:path+").unwrap();
        assert_eq!(
            pattern.matches("/files/a/b/c"),
            Some(params(&[("path", "a/b/c")]))
        );
        assert_eq!(pattern.matches("/files"), None);
        assert_eq!(
            pattern.generate(&params(&[("path", "a/b/c")])).unwrap(),
            "/files/a/b/c"
        );
    }

    #[test]
    fn test_unnamed_group_and_wildcard() {
        let group = PathPattern::new("/page/(\\d+)").unwrap();
        assert_eq!(group.matches("/page/3"), Some(params(&[("0", "3")])));

        let wildcard = PathPattern::new("/static/*").unwrap();
        assert_eq!(
            wildcard.matches("/static/css/app.css"),
            Some(params(&[("0", "css/app.css")]))
        );
    }

    #[test]
    fn test_escaped_colon_is_literal() {
        let pattern = PathPattern::new("/time\\:now").unwrap();
        assert!(pattern.matches("/time:now").is_some());
        assert_eq!(pattern.keys().count(), 0);
    }

    #[test]
    fn test_generate() {
        let empty = PathPattern::new("/").unwrap();
        assert_eq!(empty.generate(&Params::new()).unwrap(), "/");

        let article = PathPattern::new("/article/:id").unwrap();
        assert_eq!(
            article.generate(&params(&[("id", "1")])).unwrap(),
            "/article/1"
        );
    }

    #[test]
    fn test_generate_skips_missing_optional() {
        let pattern = PathPattern::new("/article/:id/:slug?").unwrap();
        assert_eq!(
            pattern.generate(&params(&[("id", "1")])).unwrap(),
            "/article/1"
        );
    }

    #[test]
    fn test_generate_missing_param() {
        let pattern = PathPattern::new("/article/:id").unwrap();
        let err = pattern.generate(&Params::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingParam {
                pattern: "/article/:id".into(),
                name: "id".into(),
            }
        );
    }

    #[test]
    fn test_generate_rejects_value_not_matching_pattern() {
        let pattern = PathPattern::new("/article/:id(\\d+)").unwrap();
        let err = pattern.generate(&params(&[("id", "abc")])).unwrap_err();
        assert!(matches!(err, RouteError::InvalidParam { ref name, .. } if name == "id"));
    }

    #[test]
    fn test_generate_then_match_round_trips() {
        let pattern = PathPattern::new("/users/:user/posts/:post").unwrap();
        let original = params(&[("user", "jane doe"), ("post", "a/b?c")]);
        let path = pattern.generate(&original).unwrap();
        assert_eq!(path, "/users/jane%20doe/posts/a%2Fb%3Fc");
        assert_eq!(pattern.matches(&path), Some(original));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::new("/:id([)"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::new("/:id/:id"),
            Err(RouteError::InvalidPattern { .. })
        ));
    }
}
