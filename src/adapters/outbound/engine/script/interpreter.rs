use super::lexer::StrPart;
use super::parser::{Arg, Expr, Statement};
use super::project::ScriptProject;
use crate::ports::outbound::{
    DeclaredDependency, DeclaredRepository, ProjectModel, RepositoryKind,
};
use crate::shared::Result;
use reqwest::Url;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2/";
pub const JCENTER_URL: &str = "https://jcenter.bintray.com/";
pub const GOOGLE_URL: &str = "https://dl.google.com/dl/android/maven2/";
pub const PLUGIN_PORTAL_URL: &str = "https://plugins.gradle.org/m2/";

/// Methods of the configuration container that never name a configuration
const CONTAINER_METHODS: &[&str] = &[
    "all",
    "each",
    "configureEach",
    "matching",
    "withType",
    "whenObjectAdded",
    "forEach",
    "getByName",
    "named",
    "findByName",
];

/// Dependency handler blocks that declare no dependencies
const HANDLER_BLOCKS: &[&str] = &[
    "constraints",
    "components",
    "modules",
    "attributesSchema",
    "artifactTypes",
    "registerTransform",
];

/// Calls whose closures run conditionally, repeatedly, or not at all
const CONTROL_FLOW: &[&str] = &[
    "if",
    "else",
    "for",
    "while",
    "switch",
    "try",
    "each",
    "eachWithIndex",
    "forEach",
    "times",
    "with",
    "tap",
];

/// Blocks that populate the dependency model
const MODEL_BLOCKS: &[&str] = &["dependencies", "repositories", "configurations"];

/// Properties every project carries
const PROJECT_PROPERTIES: &[&str] = &["group", "version", "description", "name"];

/// Runtime value of an evaluated expression
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
    /// File collections, project and platform references: no Maven coordinate
    Local(String),
    Null,
    /// Result of something the evaluator does not model
    Opaque(String),
}

fn fail(line: usize, message: impl Display) -> anyhow::Error {
    anyhow::anyhow!("line {}: {}", line, message)
}

fn unevaluated(line: usize, target: &[String]) -> anyhow::Error {
    let what = if target.is_empty() {
        "this statement".to_string()
    } else {
        format!("'{}'", target.join("."))
    };
    fail(
        line,
        format!("cannot evaluate dependency declarations inside {}", what),
    )
}

/// `project.dependencies` is `dependencies`
fn strip_project(target: &[String]) -> &[String] {
    match target {
        [head, rest @ ..] if head == "project" && !rest.is_empty() => rest,
        _ => target,
    }
}

fn is_control_flow(target: &[String]) -> bool {
    target
        .first()
        .into_iter()
        .chain(target.last())
        .any(|segment| CONTROL_FLOW.contains(&segment.as_str()))
}

/// Evaluates parsed build-script statements into a [`ScriptProject`]
pub struct Interpreter {
    project: ScriptProject,
    maven_local: Option<PathBuf>,
    locals: HashMap<String, Value>,
    extra: HashMap<String, Value>,
    properties: HashMap<String, Value>,
    deferred: Vec<Vec<Statement>>,
}

impl Interpreter {
    /// `maven_local` is the directory `mavenLocal()` points at
    pub fn new(project_dir: &Path, maven_local: Option<PathBuf>) -> Self {
        let name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut properties = HashMap::new();
        properties.insert("name".to_string(), Value::Str(name));
        properties.insert("group".to_string(), Value::Str(String::new()));
        properties.insert("version".to_string(), Value::Str("unspecified".to_string()));
        properties.insert("description".to_string(), Value::Null);

        Self {
            project: ScriptProject::new(project_dir),
            maven_local,
            locals: HashMap::new(),
            extra: HashMap::new(),
            properties,
            deferred: Vec::new(),
        }
    }

    /// Runs the script body, then every `afterEvaluate` block in order
    pub fn run(mut self, statements: &[Statement]) -> Result<ScriptProject> {
        self.project_block(statements)?;
        let mut index = 0;
        while index < self.deferred.len() {
            let block = self.deferred[index].clone();
            self.project_block(&block)?;
            index += 1;
        }
        Ok(self.project)
    }

    fn project_block(&mut self, statements: &[Statement]) -> Result<()> {
        for statement in statements {
            match statement {
                Statement::Assign {
                    target,
                    value,
                    local,
                    line,
                } => self.assign(target, value, *local, *line)?,
                Statement::Call {
                    target,
                    args,
                    closure,
                    line,
                } => self.project_call(target, args, closure.as_deref(), *line)?,
                Statement::Other { line, closures } => {
                    if closures.iter().any(|body| self.declares_model(body)) {
                        return Err(unevaluated(*line, &[]));
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether skipping `statements` would lose repositories, configurations
    /// or dependencies
    fn declares_model(&self, statements: &[Statement]) -> bool {
        statements.iter().any(|statement| match statement {
            Statement::Call {
                target,
                args,
                closure,
                ..
            } => {
                let target = strip_project(target);
                let declares_block = target
                    .first()
                    .is_some_and(|head| MODEL_BLOCKS.contains(&head.as_str()));
                let declares_dependency = matches!(target, [name] if !args.is_empty()
                    && self.project.has_configuration(name));
                declares_block
                    || declares_dependency
                    || closure.as_deref().is_some_and(|body| self.declares_model(body))
            }
            Statement::Other { closures, .. } => {
                closures.iter().any(|body| self.declares_model(body))
            }
            Statement::Assign { .. } => false,
        })
    }

    fn assign(&mut self, target: &[String], value: &Expr, local: bool, line: usize) -> Result<()> {
        let target: Vec<&str> = target.iter().map(String::as_str).collect();
        match target.as_slice() {
            [name] if local => {
                let value = self.eval(value, line)?;
                self.locals.insert(name.to_string(), value);
            }
            ["ext", name] | ["project", "ext", name] | ["rootProject", "ext", name] => {
                let value = self.eval(value, line)?;
                self.extra.insert(name.to_string(), value);
            }
            [name] | ["project", name] if PROJECT_PROPERTIES.contains(name) && *name != "name" => {
                let value = self.eval(value, line)?;
                self.properties.insert(name.to_string(), value);
            }
            [name] if self.locals.contains_key(*name) => {
                let value = self.eval(value, line)?;
                self.locals.insert(name.to_string(), value);
            }
            [name] if self.extra.contains_key(*name) => {
                let value = self.eval(value, line)?;
                self.extra.insert(name.to_string(), value);
            }
            // Task and extension settings do not affect the dependency model
            _ => {}
        }
        Ok(())
    }

    fn project_call(
        &mut self,
        target: &[String],
        args: &[Arg],
        closure: Option<&[Statement]>,
        line: usize,
    ) -> Result<()> {
        let target = strip_project(target);
        if is_control_flow(target) {
            if closure.is_some_and(|body| self.declares_model(body)) {
                return Err(unevaluated(line, target));
            }
            return Ok(());
        }

        let target: Vec<&str> = target.iter().map(String::as_str).collect();
        match (target.as_slice(), closure) {
            (["apply"], _) => self.apply(args, line)?,
            (["plugins"], Some(body)) => self.plugins_block(body)?,
            (["repositories"], Some(body)) => self.repositories_block(body)?,
            (["configurations"], Some(body)) => {
                for statement in body {
                    if let Statement::Call {
                        target,
                        args,
                        closure,
                        line,
                    } = statement
                    {
                        self.configuration_statement(target, args, closure.as_deref(), *line, true)?;
                    }
                }
            }
            (["configurations", rest @ ..], _) if !rest.is_empty() => {
                let rest: Vec<String> = rest.iter().map(|s| s.to_string()).collect();
                self.configuration_statement(&rest, args, closure, line, false)?;
            }
            (["dependencies"], Some(body)) => self.dependencies_block(body)?,
            (["dependencies", "add"], _) => self.add_dependencies_by_name(args, line)?,
            (["ext"], Some(body)) => self.ext_block(body)?,
            (["ext", "set"], _) => self.ext_set(args, line)?,
            (["allprojects"], Some(body)) => self.project_block(body)?,
            (["afterEvaluate"], Some(body)) => {
                self.deferred.push(body.to_vec());
            }
            ([name], None) if PROJECT_PROPERTIES.contains(name) && *name != "name" => {
                // Setter form: `version '1.0'`
                if let [Arg::Positional(expr)] = args {
                    let value = self.eval(expr, line)?;
                    self.properties.insert(name.to_string(), value);
                }
            }
            // buildscript, subprojects, tasks and extensions
            _ => {}
        }
        Ok(())
    }

    fn apply(&mut self, args: &[Arg], line: usize) -> Result<()> {
        for arg in args {
            match arg {
                Arg::Named(key, expr) if key == "plugin" => {
                    let id = match expr {
                        // `apply plugin: JavaPlugin`
                        Expr::Path(path) => path.join("."),
                        other => self.eval_text(other, line)?,
                    };
                    self.apply_plugin(&id, line)?;
                }
                Arg::Named(key, expr) if key == "from" => {
                    let from = self.eval_text(expr, line).unwrap_or_default();
                    return Err(fail(
                        line,
                        format!(
                            "cannot apply script '{}': only the build file itself is evaluated",
                            from
                        ),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn apply_plugin(&mut self, id: &str, line: usize) -> Result<()> {
        let id = match id {
            "JavaPlugin" => "java",
            "JavaLibraryPlugin" => "java-library",
            other => other,
        };
        self.project.apply_plugin(id).map_err(|e| fail(line, e))
    }

    fn plugins_block(&mut self, body: &[Statement]) -> Result<()> {
        for statement in body {
            if let Statement::Call {
                target, args, line, ..
            } = statement
            {
                if target.len() == 1 && target[0] == "id" {
                    if let Some(Arg::Positional(expr)) = args.first() {
                        let id = self.eval_text(expr, *line)?;
                        self.apply_plugin(&id, *line)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn repositories_block(&mut self, body: &[Statement]) -> Result<()> {
        for statement in body {
            let (target, closure, line) = match statement {
                Statement::Call {
                    target,
                    closure,
                    line,
                    ..
                } => (target, closure, line),
                Statement::Other { line, closures } if !closures.is_empty() => {
                    return Err(unevaluated(*line, &[]));
                }
                _ => continue,
            };
            if is_control_flow(target) && closure.as_ref().is_some_and(|body| !body.is_empty()) {
                return Err(unevaluated(*line, target));
            }
            if target.len() != 1 {
                continue;
            }

            let repository = match target[0].as_str() {
                "mavenCentral" => DeclaredRepository::maven(Some("MavenRepo"), Some(MAVEN_CENTRAL_URL)),
                "jcenter" => DeclaredRepository::maven(Some("BintrayJCenter"), Some(JCENTER_URL)),
                "google" => DeclaredRepository::maven(Some("Google"), Some(GOOGLE_URL)),
                "gradlePluginPortal" => DeclaredRepository::maven(
                    Some("Gradle Central Plugin Repository"),
                    Some(PLUGIN_PORTAL_URL),
                ),
                "mavenLocal" => {
                    let url = self.maven_local_url(*line)?;
                    DeclaredRepository::maven(Some("MavenLocal"), Some(url.as_str()))
                }
                "maven" => self.repository(RepositoryKind::Maven, "maven", closure.as_deref(), *line)?,
                "ivy" => self.repository(RepositoryKind::Ivy, "ivy", closure.as_deref(), *line)?,
                "flatDir" => DeclaredRepository {
                    name: Some("flatDir".to_string()),
                    kind: RepositoryKind::FlatDir,
                    url: None,
                },
                _ => continue,
            };
            self.project.add_repository(repository);
        }
        Ok(())
    }

    fn maven_local_url(&self, line: usize) -> Result<String> {
        let dir = self.maven_local.as_ref().ok_or_else(|| {
            fail(line, "cannot locate the local Maven repository: no home directory")
        })?;
        Url::from_directory_path(dir)
            .map(|url| url.to_string())
            .map_err(|_| {
                fail(
                    line,
                    format!("local Maven repository '{}' is not absolute", dir.display()),
                )
            })
    }

    fn repository(
        &self,
        kind: RepositoryKind,
        default_name: &str,
        body: Option<&[Statement]>,
        line: usize,
    ) -> Result<DeclaredRepository> {
        let mut name = default_name.to_string();
        let mut url = None;

        for statement in body.unwrap_or_default() {
            let (property, expr, line) = match statement {
                Statement::Call {
                    target, args, line, ..
                } => match args.first() {
                    Some(Arg::Positional(expr)) => (target.join("."), expr, *line),
                    _ => continue,
                },
                Statement::Assign {
                    target,
                    value,
                    line,
                    ..
                } => (target.join("."), value, *line),
                Statement::Other { .. } => continue,
            };

            match property.as_str() {
                "url" | "setUrl" => url = Some(self.eval_location(expr, line)?),
                "name" => name = self.eval_text(expr, line)?,
                _ => {}
            }
        }

        if kind == RepositoryKind::Maven && url.is_none() {
            return Err(fail(
                line,
                format!("you must specify a URL for Maven repository '{}'", name),
            ));
        }

        Ok(DeclaredRepository {
            name: Some(name),
            kind,
            url,
        })
    }

    fn configuration_statement(
        &mut self,
        target: &[String],
        args: &[Arg],
        closure: Option<&[Statement]>,
        line: usize,
        declaring: bool,
    ) -> Result<()> {
        let target: Vec<&str> = target.iter().map(String::as_str).collect();
        match target.as_slice() {
            ["create" | "register" | "maybeCreate"] => {
                let Some(Arg::Positional(expr)) = args.first() else {
                    return Err(fail(line, "a configuration name is required"));
                };
                let name = self.eval_text(expr, line)?;
                self.project.maybe_create(&name);
                if let Some(body) = closure {
                    self.configuration_body(&name, body)?;
                }
            }
            [name] if CONTAINER_METHODS.contains(name) => {}
            [name] if declaring && args.is_empty() => {
                self.project.maybe_create(name);
                if let Some(body) = closure {
                    self.configuration_body(name, body)?;
                }
            }
            [name, "extendsFrom"] => {
                if !self.project.has_configuration(name) {
                    return Err(fail(
                        line,
                        format!(
                            "Could not get unknown property '{}' for configuration container",
                            name
                        ),
                    ));
                }
                self.extend_from(name, args, line)?;
            }
            // exclude rules, resolution strategies and attributes
            _ => {}
        }
        Ok(())
    }

    fn configuration_body(&mut self, name: &str, body: &[Statement]) -> Result<()> {
        for statement in body {
            if let Statement::Call {
                target, args, line, ..
            } = statement
            {
                if target.len() == 1 && target[0] == "extendsFrom" {
                    self.extend_from(name, args, *line)?;
                }
            }
        }
        Ok(())
    }

    fn extend_from(&mut self, name: &str, args: &[Arg], line: usize) -> Result<()> {
        for arg in args {
            let Arg::Positional(expr) = arg else {
                return Err(fail(line, "extendsFrom expects configurations"));
            };
            let parent = match expr {
                Expr::Path(path) => match path.as_slice() {
                    [parent] => parent.clone(),
                    [container, parent] if container == "configurations" => parent.clone(),
                    _ => return Err(fail(line, format!("'{}' is not a configuration", path.join(".")))),
                },
                other => self.eval_text(other, line)?,
            };
            self.project
                .extend(name, &parent)
                .map_err(|e| fail(line, e))?;
        }
        Ok(())
    }

    fn dependencies_block(&mut self, body: &[Statement]) -> Result<()> {
        for statement in body {
            let (target, args, closure, line) = match statement {
                Statement::Call {
                    target,
                    args,
                    closure,
                    line,
                } => (target, args, closure, line),
                Statement::Assign {
                    target,
                    value,
                    local,
                    line,
                } => {
                    self.assign(target, value, *local, *line)?;
                    continue;
                }
                Statement::Other { line, .. } => return Err(unevaluated(*line, &[])),
            };
            if is_control_flow(target) {
                if closure.as_deref().is_some_and(|body| self.declares_model(body)) {
                    return Err(unevaluated(*line, target));
                }
                continue;
            }
            match target.as_slice() {
                [method] if method == "add" => self.add_dependencies_by_name(args, *line)?,
                [method] if HANDLER_BLOCKS.contains(&method.as_str()) => {}
                [configuration] if !args.is_empty() => {
                    self.add_dependencies(configuration, args, *line)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// `add('runtime', 'g:a:v')`
    fn add_dependencies_by_name(&mut self, args: &[Arg], line: usize) -> Result<()> {
        let Some((Arg::Positional(first), rest)) = args.split_first() else {
            return Err(fail(line, "add() expects a configuration name"));
        };
        let configuration = self.eval_text(first, line)?;
        self.add_dependencies(&configuration, rest, line)
    }

    fn add_dependencies(&mut self, configuration: &str, args: &[Arg], line: usize) -> Result<()> {
        if !self.project.has_configuration(configuration) {
            if !self.project.has_foreign_plugin() {
                return Err(fail(
                    line,
                    format!(
                        "Could not find method {}() for arguments on the dependency handler: \
                         no configuration named '{}'",
                        configuration, configuration
                    ),
                ));
            }
            // Assume an applied third-party plugin contributes it
            self.project.maybe_create(configuration);
        }

        let mut named = Vec::new();
        let mut declared = Vec::new();
        for arg in args {
            match arg {
                Arg::Named(key, expr) => named.push((key.clone(), self.eval(expr, line)?)),
                Arg::Positional(expr) => {
                    let value = self.eval(expr, line)?;
                    declared.extend(to_dependencies(value, line)?);
                }
            }
        }
        if !named.is_empty() {
            declared.push(map_notation(&named, line)?);
        }

        for dependency in declared {
            self.project
                .add_dependency(configuration, dependency)
                .map_err(|e| fail(line, e))?;
        }
        Ok(())
    }

    fn ext_block(&mut self, body: &[Statement]) -> Result<()> {
        for statement in body {
            match statement {
                Statement::Assign {
                    target,
                    value,
                    line,
                    ..
                } if target.len() == 1 => {
                    let value = self.eval(value, *line)?;
                    self.extra.insert(target[0].clone(), value);
                }
                Statement::Call {
                    target, args, line, ..
                } if target.len() == 1 && target[0] == "set" => self.ext_set(args, *line)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn ext_set(&mut self, args: &[Arg], line: usize) -> Result<()> {
        let [Arg::Positional(name), Arg::Positional(value)] = args else {
            return Err(fail(line, "ext.set() expects a name and a value"));
        };
        let name = self.eval_text(name, line)?;
        let value = self.eval(value, line)?;
        self.extra.insert(name, value);
        Ok(())
    }

    fn eval(&self, expr: &Expr, line: usize) -> Result<Value> {
        Ok(match expr {
            Expr::Str(parts) => Value::Str(self.interpolate(parts, line)?),
            Expr::Number(n) => Value::Str(n.clone()),
            Expr::Bool(b) => Value::Str(b.to_string()),
            Expr::Null => Value::Null,
            Expr::Path(path) => self.lookup(path, line)?,
            Expr::Call { target, args } => self.call(target, args, line)?,
            Expr::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.eval(item, line))
                    .collect::<Result<_>>()?,
            ),
            Expr::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| -> Result<(String, Value)> { Ok((k.clone(), self.eval(v, line)?)) })
                    .collect::<Result<_>>()?,
            ),
            Expr::Closure(_) => Value::Opaque("closure".to_string()),
            Expr::Concat(operands) => {
                let mut text = String::new();
                for operand in operands {
                    let value = self.eval(operand, line)?;
                    text.push_str(&as_text(&value, line)?);
                }
                Value::Str(text)
            }
            Expr::Unsupported => Value::Opaque("expression".to_string()),
        })
    }

    fn eval_text(&self, expr: &Expr, line: usize) -> Result<String> {
        as_text(&self.eval(expr, line)?, line)
    }

    /// A repository location: a string, `uri(...)` or `file(...)`
    fn eval_location(&self, expr: &Expr, line: usize) -> Result<String> {
        match self.eval(expr, line)? {
            Value::Str(s) => Ok(s),
            Value::Null => Err(fail(line, "repository URL must not be null")),
            other => Err(fail(
                line,
                format!("cannot convert {} to a repository URL", describe(&other)),
            )),
        }
    }

    fn interpolate(&self, parts: &[StrPart], line: usize) -> Result<String> {
        let mut text = String::new();
        for part in parts {
            match part {
                StrPart::Literal(s) => text.push_str(s),
                StrPart::Interpolation(expression) => {
                    let path: Vec<String> = expression.split('.').map(str::to_string).collect();
                    let simple = path.iter().all(|segment| {
                        !segment.is_empty()
                            && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
                    });
                    if !simple {
                        return Err(fail(
                            line,
                            format!("unsupported expression '${{{}}}' in string", expression),
                        ));
                    }
                    let value = self.lookup(&path, line)?;
                    text.push_str(&as_text(&value, line)?);
                }
            }
        }
        Ok(text)
    }

    /// Resolves `name`, `ext.name` or `project.name`, then indexes into map
    /// values with any remaining segments
    fn lookup(&self, path: &[String], line: usize) -> Result<Value> {
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();
        let (qualified, name, keys) = match segments.as_slice() {
            ["project" | "rootProject", "ext", name, keys @ ..] => (true, *name, keys),
            ["project" | "rootProject" | "ext", name, keys @ ..] => (true, *name, keys),
            [name, keys @ ..] => (false, *name, keys),
            [] => return Err(fail(line, "empty property reference")),
        };

        let mut value = self.property(qualified, name, line)?;
        for key in keys {
            value = match value {
                Value::Map(entries) => entries
                    .into_iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v)
                    .unwrap_or(Value::Null),
                other => {
                    return Err(fail(
                        line,
                        format!(
                            "Could not get unknown property '{}' on {}",
                            key,
                            describe(&other)
                        ),
                    ))
                }
            };
        }
        Ok(value)
    }

    fn property(&self, qualified: bool, name: &str, line: usize) -> Result<Value> {
        if !qualified {
            if let Some(value) = self.locals.get(name) {
                return Ok(value.clone());
            }
        }
        if let Some(value) = self.extra.get(name).or_else(|| self.properties.get(name)) {
            return Ok(value.clone());
        }

        let dir = self.project.project_dir();
        match name {
            "projectDir" | "rootDir" => Ok(Value::Str(dir.display().to_string())),
            "buildDir" => Ok(Value::Str(dir.join("build").display().to_string())),
            _ => Err(fail(
                line,
                format!("Could not get unknown property '{}' for root project", name),
            )),
        }
    }

    fn call(&self, target: &[String], args: &[Arg], line: usize) -> Result<Value> {
        let target: Vec<&str> = target.iter().map(String::as_str).collect();
        let first_text = |interpreter: &Self| -> Result<String> {
            match args.first() {
                Some(Arg::Positional(expr)) => interpreter.eval_text(expr, line),
                _ => Err(fail(
                    line,
                    format!("{}() expects an argument", target.join(".")),
                )),
            }
        };

        match target.as_slice() {
            ["uri" | "file"] => Ok(Value::Str(first_text(self)?)),
            ["files"] => {
                let names = args
                    .iter()
                    .filter_map(|arg| match arg {
                        Arg::Positional(expr) => Some(self.eval_text(expr, line)),
                        Arg::Named(..) => None,
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Local(format!("files({})", names.join(", "))))
            }
            ["fileTree"] => Ok(Value::Local("fileTree".to_string())),
            ["project"] => {
                let path = match args.first() {
                    Some(Arg::Positional(expr)) => self.eval_text(expr, line)?,
                    _ => args
                        .iter()
                        .find_map(|arg| match arg {
                            Arg::Named(key, expr) if key == "path" => Some(expr),
                            _ => None,
                        })
                        .map(|expr| self.eval_text(expr, line))
                        .transpose()?
                        .unwrap_or_default(),
                };
                Ok(Value::Local(format!("project '{}'", path)))
            }
            ["platform" | "enforcedPlatform" | "testFixtures"] => {
                Ok(Value::Local(format!("{}({})", target[0], first_text(self)?)))
            }
            ["gradleApi" | "localGroovy" | "gradleTestKit"] => {
                Ok(Value::Local(format!("{}()", target[0])))
            }
            ["kotlin"] => {
                let module = first_text(self)?;
                let version = match args.get(1) {
                    Some(Arg::Positional(expr)) => Some(self.eval_text(expr, line)?),
                    _ => None,
                };
                let mut notation = format!("org.jetbrains.kotlin:kotlin-{}", module);
                if let Some(version) = version {
                    notation.push(':');
                    notation.push_str(&version);
                }
                Ok(Value::Str(notation))
            }
            ["property" | "getProperty"] | ["project", "property"] => {
                let name = first_text(self)?;
                self.lookup(&[name], line)
            }
            ["findProperty"] | ["project", "findProperty"] => {
                let name = first_text(self)?;
                Ok(self.lookup(&[name], line).unwrap_or(Value::Null))
            }
            ["hasProperty"] | ["project", "hasProperty"] => {
                let name = first_text(self)?;
                Ok(Value::Str(self.lookup(&[name], line).is_ok().to_string()))
            }
            _ => Ok(Value::Opaque(format!("{}()", target.join(".")))),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("'{}'", s),
        Value::List(_) => "a list".to_string(),
        Value::Map(_) => "a map".to_string(),
        Value::Local(desc) => desc.clone(),
        Value::Null => "null".to_string(),
        Value::Opaque(desc) => format!("the result of {}", desc),
    }
}

fn as_text(value: &Value, line: usize) -> Result<String> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Null => Ok("null".to_string()),
        other => Err(fail(
            line,
            format!("cannot convert {} to a string", describe(other)),
        )),
    }
}

fn to_dependencies(value: Value, line: usize) -> Result<Vec<DeclaredDependency>> {
    match value {
        Value::Str(notation) => Ok(vec![parse_notation(&notation, line)?]),
        Value::List(items) => {
            let mut all = Vec::new();
            for item in items {
                all.extend(to_dependencies(item, line)?);
            }
            Ok(all)
        }
        Value::Map(entries) => Ok(vec![map_notation(&entries, line)?]),
        Value::Local(desc) => Ok(vec![DeclaredDependency::local(&desc)]),
        Value::Null => Err(fail(
            line,
            "Cannot convert a null value to an object of type Dependency",
        )),
        Value::Opaque(desc) => Err(fail(
            line,
            format!("unsupported dependency notation: {}", desc),
        )),
    }
}

/// `group:name[:version[:classifier]][@extension]`
fn parse_notation(notation: &str, line: usize) -> Result<DeclaredDependency> {
    let coordinates = notation
        .split_once('@')
        .map_or(notation, |(coordinates, _)| coordinates);
    let parts: Vec<&str> = coordinates.split(':').collect();

    let (group, name, version) = match parts.as_slice() {
        [group, name] => (*group, *name, None),
        [group, name, version] | [group, name, version, _] => (*group, *name, Some(*version)),
        _ => {
            return Err(fail(
                line,
                format!("invalid dependency notation '{}'", notation),
            ))
        }
    };
    if name.is_empty() {
        return Err(fail(
            line,
            format!("invalid dependency notation '{}'", notation),
        ));
    }

    Ok(DeclaredDependency::module(
        group,
        name,
        version.filter(|v| !v.is_empty()),
    ))
}

/// `group: 'g', name: 'a', version: 'v'`
fn map_notation(entries: &[(String, Value)], line: usize) -> Result<DeclaredDependency> {
    let field = |key: &str| -> Result<Option<String>> {
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| as_text(value, line))
            .transpose()
    };

    let name = field("name")?
        .ok_or_else(|| fail(line, "Required keys [name] are missing from map"))?;
    Ok(DeclaredDependency {
        group: field("group")?,
        name,
        version: field("version")?.filter(|v| !v.is_empty()),
        external: true,
    })
}
