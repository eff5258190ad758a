//! In-memory registry of software records and the lookups between them.

use crate::context::ContextMap;
use crate::errors::{RegistryError, SiminputError};
use crate::software::{Application, Executable, Flavor};
use crate::template::Template;
use serde_json::Value;
use tracing::{debug, warn};

/// In-memory store of application, executable, flavor, and template records.
///
/// Records reference each other by name only; the registry resolves those
/// soft references at lookup time. Nothing is checked at insertion, so a
/// registry can be seeded in any order.
#[derive(Debug, Clone, Default)]
pub struct ApplicationRegistry {
    applications: Vec<Application>,
    executables: Vec<Executable>,
    flavors: Vec<Flavor>,
    templates: Vec<Template>,
}

impl ApplicationRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an application record.
    pub fn add_application(&mut self, application: Application) {
        self.applications.push(application);
    }

    /// Registers an executable record.
    pub fn add_executable(&mut self, executable: Executable) {
        self.executables.push(executable);
    }

    /// Registers a flavor record.
    pub fn add_flavor(&mut self, flavor: Flavor) {
        self.flavors.push(flavor);
    }

    /// Registers an input file template.
    pub fn add_template(&mut self, template: Template) {
        self.templates.push(template);
    }

    /// All registered applications, in insertion order.
    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// All registered executables, in insertion order.
    #[must_use]
    pub fn executables(&self) -> &[Executable] {
        &self.executables
    }

    /// All registered flavors, in insertion order.
    #[must_use]
    pub fn flavors(&self) -> &[Flavor] {
        &self.flavors
    }

    /// All registered templates, in insertion order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// True when nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
            && self.executables.is_empty()
            && self.flavors.is_empty()
            && self.templates.is_empty()
    }

    /// Looks up an application by name, optionally narrowed by version and
    /// build.
    ///
    /// With several records under the same name, a requested version must
    /// match exactly; a requested build is preferred but falls back to the
    /// remaining candidates. Without narrowing, the record flagged
    /// `is_default` wins, else the first registered.
    pub fn get_application(
        &self,
        name: &str,
        version: Option<&str>,
        build: Option<&str>,
    ) -> Result<&Application, RegistryError> {
        let mut candidates: Vec<&Application> = self
            .applications
            .iter()
            .filter(|application| application.name == name)
            .collect();

        if candidates.is_empty() {
            warn!(application = %name, "application not found");
            return Err(RegistryError::application_not_found(name));
        }

        if let Some(version) = version {
            candidates.retain(|application| application.version.as_deref() == Some(version));
            if candidates.is_empty() {
                warn!(application = %name, version = %version, "version not available");
                return Err(RegistryError::version_not_available(name, version));
            }
        }

        if let Some(build) = build {
            if let Some(found) = candidates
                .iter()
                .copied()
                .find(|application| application.build.as_deref() == Some(build))
            {
                return Ok(found);
            }
        }

        candidates
            .iter()
            .copied()
            .find(|application| application.is_default.unwrap_or(false))
            .or_else(|| candidates.first().copied())
            .ok_or_else(|| RegistryError::application_not_found(name))
    }

    /// All executables whose `application_id` references the application.
    #[must_use]
    pub fn get_executables(&self, application_name: &str) -> Vec<&Executable> {
        self.executables
            .iter()
            .filter(|executable| executable.belongs_to(application_name))
            .collect()
    }

    /// Looks up one executable of an application by name, or the default
    /// executable when no name is given.
    pub fn get_executable_by_name(
        &self,
        application_name: &str,
        name: Option<&str>,
    ) -> Result<&Executable, RegistryError> {
        self.get_executables(application_name)
            .into_iter()
            .find(|executable| match name {
                Some(name) => executable.name == name,
                None => executable.is_default.unwrap_or(false),
            })
            .ok_or_else(|| {
                warn!(
                    application = %application_name,
                    executable = name.unwrap_or(""),
                    "executable not found"
                );
                RegistryError::executable_not_found(name.unwrap_or(""), application_name)
            })
    }

    /// All flavors whose `executable_name` references the executable.
    #[must_use]
    pub fn get_executable_flavors(&self, executable: &Executable) -> Vec<&Flavor> {
        self.flavors
            .iter()
            .filter(|flavor| flavor.executable_name.as_deref() == Some(executable.name.as_str()))
            .collect()
    }

    /// Looks up one flavor of an executable by name, or the default flavor
    /// when no name is given.
    #[must_use]
    pub fn get_flavor_by_name(
        &self,
        executable: &Executable,
        name: Option<&str>,
    ) -> Option<&Flavor> {
        self.get_executable_flavors(executable)
            .into_iter()
            .find(|flavor| match name {
                Some(name) => flavor.name == name,
                None => flavor.is_default.unwrap_or(false),
            })
    }

    /// Flavors of every executable of an application, optionally narrowed to
    /// those supporting a given application version.
    #[must_use]
    pub fn get_all_application_flavors(
        &self,
        application_name: &str,
        version: Option<&str>,
    ) -> Vec<&Flavor> {
        self.get_executables(application_name)
            .into_iter()
            .flat_map(|executable| self.get_executable_flavors(executable))
            .filter(|flavor| version.map_or(true, |v| flavor.supports_application_version(v)))
            .collect()
    }

    /// Resolves a flavor's input references to template records.
    ///
    /// Each input is matched against registered templates by `template_name`,
    /// falling back to `name`. The returned templates are clones; when an
    /// input carries its own `name`, the clone is renamed so the rendered
    /// file lands under that name.
    pub fn get_input_templates(&self, flavor: &Flavor) -> Result<Vec<Template>, RegistryError> {
        flavor
            .input
            .iter()
            .map(|input| {
                let lookup = input.template_lookup_name().unwrap_or_default();
                let Some(found) = self.templates.iter().find(|t| t.name == lookup) else {
                    warn!(template = %lookup, flavor = %flavor.name, "input template not found");
                    return Err(RegistryError::template_not_found(lookup));
                };
                let mut template = found.clone();
                if let Some(name) = input.name.as_deref().filter(|s| !s.is_empty()) {
                    template.name = name.to_string();
                }
                Ok(template)
            })
            .collect()
    }

    /// Renders every input template of a flavor against an external context
    /// and returns the rendered records as JSON objects.
    pub fn get_rendered_input(
        &self,
        flavor: &Flavor,
        external: Option<&ContextMap>,
    ) -> Result<Vec<Value>, SiminputError> {
        let templates = self.get_input_templates(flavor)?;
        debug!(flavor = %flavor.name, count = templates.len(), "rendering input templates");

        let mut rendered = Vec::with_capacity(templates.len());
        for mut template in templates {
            rendered.push(template.get_rendered_json(external)?);
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextProvider;
    use crate::software::FlavorInput;
    use serde_json::json;

    fn object(value: Value) -> ContextMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn seeded_registry() -> ApplicationRegistry {
        let mut registry = ApplicationRegistry::new();
        registry.add_application(
            Application::new("espresso")
                .with_short_name("qe")
                .with_version("6.3"),
        );
        registry.add_executable(
            Executable::new("pw.x")
                .with_application("espresso")
                .with_is_default(true),
        );
        registry.add_executable(Executable::new("ph.x").with_application("espresso"));
        registry.add_flavor(
            Flavor::new("scf")
                .with_executable_name("pw.x")
                .with_application_name("espresso")
                .with_is_default(true)
                .with_input(FlavorInput::from_template_name("pw_scf.in")),
        );
        registry.add_flavor(
            Flavor::new("bands")
                .with_executable_name("pw.x")
                .with_application_name("espresso")
                .with_supported_application_versions(vec!["7.2".to_string()])
                .with_input(
                    FlavorInput::from_template_name("pw_scf.in").with_name("pw_bands.in"),
                ),
        );
        registry.add_template(
            Template::new("pw_scf.in", "ecutwfc = {{ cutoffs.ecutwfc }}")
                .with_application_name("espresso")
                .with_executable_name("pw.x")
                .with_context_provider(
                    ContextProvider::new("cutoffs").with_data(object(json!({"ecutwfc": 40}))),
                ),
        );
        registry
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = ApplicationRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.applications().is_empty());
    }

    #[test]
    fn test_registry_get_application() {
        let registry = seeded_registry();
        let app = registry.get_application("espresso", None, None).unwrap();
        assert_eq!(app.get_short_name(), "qe");

        let err = registry.get_application("lammps", None, None).unwrap_err();
        assert_eq!(err, RegistryError::application_not_found("lammps"));
    }

    #[test]
    fn test_registry_get_application_version_narrowing() {
        let mut registry = seeded_registry();
        registry.add_application(Application::new("espresso").with_version("7.2"));

        let app = registry
            .get_application("espresso", Some("7.2"), None)
            .unwrap();
        assert_eq!(app.version.as_deref(), Some("7.2"));

        let err = registry
            .get_application("espresso", Some("9.9"), None)
            .unwrap_err();
        assert_eq!(err, RegistryError::version_not_available("espresso", "9.9"));
    }

    #[test]
    fn test_registry_get_application_prefers_default_then_build() {
        let mut registry = ApplicationRegistry::new();
        registry.add_application(Application::new("vasp").with_version("5.4.4"));
        registry.add_application(
            Application::new("vasp")
                .with_version("5.4.4")
                .with_build("VTST")
                .with_is_default(true),
        );

        let app = registry.get_application("vasp", None, None).unwrap();
        assert_eq!(app.build.as_deref(), Some("VTST"));

        let app = registry
            .get_application("vasp", Some("5.4.4"), Some("VTST"))
            .unwrap();
        assert_eq!(app.build.as_deref(), Some("VTST"));

        // An unknown build falls back instead of erroring.
        let app = registry
            .get_application("vasp", Some("5.4.4"), Some("GPU"))
            .unwrap();
        assert_eq!(app.name, "vasp");
    }

    #[test]
    fn test_registry_get_executables() {
        let registry = seeded_registry();
        let executables = registry.get_executables("espresso");
        assert_eq!(executables.len(), 2);
        assert!(registry.get_executables("vasp").is_empty());
    }

    #[test]
    fn test_registry_get_executable_by_name() {
        let registry = seeded_registry();
        let by_name = registry
            .get_executable_by_name("espresso", Some("ph.x"))
            .unwrap();
        assert_eq!(by_name.name, "ph.x");

        let default = registry.get_executable_by_name("espresso", None).unwrap();
        assert_eq!(default.name, "pw.x");

        let err = registry
            .get_executable_by_name("espresso", Some("cp.x"))
            .unwrap_err();
        assert_eq!(err, RegistryError::executable_not_found("cp.x", "espresso"));
    }

    #[test]
    fn test_registry_get_executable_flavors() {
        let registry = seeded_registry();
        let pw = registry
            .get_executable_by_name("espresso", Some("pw.x"))
            .unwrap();
        let flavors = registry.get_executable_flavors(pw);
        assert_eq!(flavors.len(), 2);

        let ph = registry
            .get_executable_by_name("espresso", Some("ph.x"))
            .unwrap();
        assert!(registry.get_executable_flavors(ph).is_empty());
    }

    #[test]
    fn test_registry_get_flavor_by_name() {
        let registry = seeded_registry();
        let pw = registry
            .get_executable_by_name("espresso", Some("pw.x"))
            .unwrap();

        let bands = registry.get_flavor_by_name(pw, Some("bands")).unwrap();
        assert_eq!(bands.name, "bands");

        let default = registry.get_flavor_by_name(pw, None).unwrap();
        assert_eq!(default.name, "scf");

        assert!(registry.get_flavor_by_name(pw, Some("relax")).is_none());
    }

    #[test]
    fn test_registry_get_all_application_flavors() {
        let registry = seeded_registry();
        let all = registry.get_all_application_flavors("espresso", None);
        assert_eq!(all.len(), 2);

        // "bands" is pinned to 7.2; "scf" supports every version.
        let for_63 = registry.get_all_application_flavors("espresso", Some("6.3"));
        assert_eq!(for_63.len(), 1);
        assert_eq!(for_63[0].name, "scf");
    }

    #[test]
    fn test_registry_get_input_templates_renames_clone() {
        let registry = seeded_registry();
        let pw = registry
            .get_executable_by_name("espresso", Some("pw.x"))
            .unwrap();
        let bands = registry.get_flavor_by_name(pw, Some("bands")).unwrap();

        let templates = registry.get_input_templates(bands).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "pw_bands.in");
        // The registered record keeps its own name.
        assert_eq!(registry.templates()[0].name, "pw_scf.in");
    }

    #[test]
    fn test_registry_get_input_templates_missing() {
        let registry = seeded_registry();
        let orphan = Flavor::new("nscf")
            .with_executable_name("pw.x")
            .with_input(FlavorInput::from_template_name("pw_nscf.in"));

        let err = registry.get_input_templates(&orphan).unwrap_err();
        assert_eq!(err, RegistryError::template_not_found("pw_nscf.in"));
    }

    #[test]
    fn test_registry_get_rendered_input() {
        let registry = seeded_registry();
        let pw = registry
            .get_executable_by_name("espresso", Some("pw.x"))
            .unwrap();
        let scf = registry.get_flavor_by_name(pw, None).unwrap();

        let rendered = registry.get_rendered_input(scf, None).unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0]["name"], json!("pw_scf.in"));
        assert_eq!(rendered[0]["rendered"], json!("ecutwfc = 40"));
    }

    #[test]
    fn test_registry_get_rendered_input_propagates_render_failure() {
        let mut registry = seeded_registry();
        registry.add_template(Template::new("incar", "ENCUT = {{ encut }}"));
        let flavor = Flavor::new("static")
            .with_executable_name("vasp")
            .with_input(FlavorInput::from_template_name("incar"));

        let err = registry.get_rendered_input(&flavor, None).unwrap_err();
        assert!(matches!(err, SiminputError::Render(_)));
    }
}
