use crate::shared::error::RuntimeError;
use std::fmt;
use std::str::FromStr;

/// Usage bucket of a dependency, following the Maven scope vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyScope {
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl DependencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::Compile => "compile",
            DependencyScope::Provided => "provided",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Test => "test",
            DependencyScope::System => "system",
            DependencyScope::Import => "import",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compile" => Ok(DependencyScope::Compile),
            "provided" => Ok(DependencyScope::Provided),
            "runtime" => Ok(DependencyScope::Runtime),
            "test" => Ok(DependencyScope::Test),
            "system" => Ok(DependencyScope::System),
            "import" => Ok(DependencyScope::Import),
            _ => Err(RuntimeError::Validation {
                message: format!(
                    "Invalid scope: {}. Expected one of compile, provided, runtime, test, system, import",
                    s
                ),
            }),
        }
    }
}

/// Ordered set of scopes a caller wants to keep
///
/// Insertion order is preserved and duplicates are dropped. The default set is
/// {COMPILE, RUNTIME}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSet {
    scopes: Vec<DependencyScope>,
}

impl ScopeSet {
    pub fn new<I>(scopes: I) -> Self
    where
        I: IntoIterator<Item = DependencyScope>,
    {
        let mut ordered = Vec::new();
        for scope in scopes {
            if !ordered.contains(&scope) {
                ordered.push(scope);
            }
        }
        Self { scopes: ordered }
    }

    /// A set that keeps nothing
    pub fn empty() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn contains(&self, scope: DependencyScope) -> bool {
        self.scopes.contains(&scope)
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = DependencyScope> + '_ {
        self.scopes.iter().copied()
    }
}

impl Default for ScopeSet {
    fn default() -> Self {
        Self::new([DependencyScope::Compile, DependencyScope::Runtime])
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.scopes.iter().map(|s| s.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl FromIterator<DependencyScope> for ScopeSet {
    fn from_iter<T: IntoIterator<Item = DependencyScope>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_str_case_insensitive() {
        assert_eq!(
            DependencyScope::from_str("RUNTIME").unwrap(),
            DependencyScope::Runtime
        );
        assert_eq!(
            DependencyScope::from_str(" compile ").unwrap(),
            DependencyScope::Compile
        );
    }

    #[test]
    fn test_scope_from_str_invalid() {
        let err = DependencyScope::from_str("implementation").unwrap_err();
        assert!(err.to_string().contains("Invalid scope: implementation"));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(DependencyScope::Provided.to_string(), "provided");
    }

    #[test]
    fn test_default_scope_set() {
        let scopes = ScopeSet::default();
        assert_eq!(
            scopes.iter().collect::<Vec<_>>(),
            vec![DependencyScope::Compile, DependencyScope::Runtime]
        );
        assert!(!scopes.contains(DependencyScope::Test));
    }

    #[test]
    fn test_scope_set_preserves_order_and_drops_duplicates() {
        let scopes = ScopeSet::new([
            DependencyScope::Runtime,
            DependencyScope::Test,
            DependencyScope::Runtime,
        ]);
        assert_eq!(scopes.len(), 2);
        assert_eq!(scopes.to_string(), "{runtime, test}");
    }

    #[test]
    fn test_empty_scope_set() {
        assert!(ScopeSet::empty().is_empty());
    }
}
