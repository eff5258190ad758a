//! Comprehensive tests exercising the software records together.

#[cfg(test)]
mod tests {
    use crate::context::{ContextMap, ContextProvider};
    use crate::entity::ExportMode;
    use crate::software::{Application, ApplicationRegistry, Executable, Flavor, FlavorInput};
    use crate::template::Template;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn map_of(value: Value) -> ContextMap {
        value.as_object().cloned().unwrap_or_default()
    }

    const PW_SCF_CONTENT: &str = "&CONTROL\n  calculation = 'scf'\n/\n&SYSTEM\n  ecutwfc = {{ cutoffs.ecutwfc }}\n  ecutrho = {{ cutoffs.ecutrho }}\n/\nK_POINTS automatic\n{{ kgrid.nk1 }} {{ kgrid.nk2 }} {{ kgrid.nk3 }} {{ kgrid.s1 }} {{ kgrid.s2 }} {{ kgrid.s3 }}\n";

    fn espresso_registry() -> ApplicationRegistry {
        let mut registry = ApplicationRegistry::new();
        registry.add_application(
            Application::new("espresso")
                .with_version("7.2")
                .with_build("standard")
                .with_short_name("QE")
                .with_summary("Quantum ESPRESSO"),
        );
        registry.add_executable(
            Executable::new("pw.x")
                .with_application("espresso")
                .with_is_default(true)
                .with_monitors(vec![json!({"name": "convergence"})])
                .with_results(vec![
                    json!({"name": "total_energy"}),
                    json!({"name": "band_gap"}),
                ]),
        );
        registry.add_flavor(
            Flavor::new("scf")
                .with_executable_name("pw.x")
                .with_application_name("espresso")
                .with_supported_application_versions(vec![
                    "7.0".to_string(),
                    "7.1".to_string(),
                    "7.2".to_string(),
                ])
                .with_is_default(true)
                .with_input(FlavorInput::from_template_name("pw_scf.in")),
        );
        registry.add_template(
            Template::new("pw_scf.in", PW_SCF_CONTENT)
                .with_application_name("espresso")
                .with_executable_name("pw.x")
                .with_context_provider(
                    ContextProvider::new("cutoffs")
                        .with_data(map_of(json!({"ecutwfc": 40, "ecutrho": 160}))),
                )
                .with_context_provider(ContextProvider::new("kgrid").with_data(map_of(json!({
                    "nk1": 4, "nk2": 4, "nk3": 4, "s1": 0, "s2": 0, "s3": 0
                })))),
        );
        registry
    }

    #[test]
    fn test_end_to_end_espresso_records() {
        let app = Application::new("espresso")
            .with_version("7.2")
            .with_build("standard")
            .with_short_name("QE")
            .with_summary("Quantum ESPRESSO")
            .with_advanced_compute_options(true);
        assert_eq!(app.get_short_name(), "QE");
        assert!(app.is_using_material());

        let executable = Executable::new("pw.x")
            .with_application(&app.name)
            .with_is_default(true)
            .with_results(vec![
                json!({"name": "total_energy"}),
                json!({"name": "band_gap"}),
            ]);
        assert_eq!(executable.application_id, vec!["espresso".to_string()]);
        assert_eq!(executable.results.len(), 2);

        let template = Template::new("pw_scf.in", "&CONTROL\n  calculation='scf'\n/")
            .with_application_name(&app.name)
            .with_executable_name(&executable.name)
            .with_context_provider(ContextProvider::new("material"));
        assert_eq!(template.get_rendered(), "&CONTROL\n  calculation='scf'\n/");
        assert_eq!(template.context_providers.len(), 1);

        let flavor = Flavor::new("scf")
            .with_executable_name(&executable.name)
            .with_application_name(&app.name)
            .with_input(FlavorInput::from_template_name(&template.name))
            .with_supported_application_versions(vec!["7.2".to_string()])
            .with_is_default(true);
        assert_eq!(flavor.executable_name.as_deref(), Some("pw.x"));
        assert_eq!(
            flavor.input[0].template_lookup_name(),
            Some(template.name.as_str())
        );
    }

    #[test]
    fn test_registry_resolves_default_chain() {
        let registry = espresso_registry();

        let app = registry
            .get_application("espresso", Some("7.2"), None)
            .unwrap();
        let executable = registry.get_executable_by_name(&app.name, None).unwrap();
        assert_eq!(executable.name, "pw.x");

        let flavor = registry.get_flavor_by_name(executable, None).unwrap();
        assert_eq!(flavor.name, "scf");
        assert!(flavor.supports_application_version("7.2"));

        let templates = registry.get_input_templates(flavor).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "pw_scf.in");
    }

    #[test]
    fn test_rendered_inputs_from_provider_data() {
        let registry = espresso_registry();
        let executable = registry.get_executable_by_name("espresso", None).unwrap();
        let flavor = registry.get_flavor_by_name(executable, None).unwrap();

        let rendered = registry.get_rendered_input(flavor, None).unwrap();
        assert_eq!(rendered.len(), 1);

        let text = rendered[0]["rendered"].as_str().unwrap();
        assert_eq!(
            text,
            "&CONTROL\n  calculation = 'scf'\n/\n&SYSTEM\n  ecutwfc = 40\n  ecutrho = 160\n/\nK_POINTS automatic\n4 4 4 0 0 0\n"
        );
    }

    #[test]
    fn test_rendered_inputs_honor_external_context() {
        let registry = espresso_registry();
        let executable = registry.get_executable_by_name("espresso", None).unwrap();
        let flavor = registry.get_flavor_by_name(executable, None).unwrap();

        let external = map_of(json!({
            "cutoffs": {"ecutwfc": 60, "ecutrho": 240}
        }));
        let rendered = registry.get_rendered_input(flavor, Some(&external)).unwrap();

        let text = rendered[0]["rendered"].as_str().unwrap();
        assert!(text.contains("ecutwfc = 60"));
        assert!(text.contains("ecutrho = 240"));
        // Unclaimed provider keys still come from the stored data.
        assert!(text.contains("4 4 4 0 0 0"));
    }

    #[test]
    fn test_serialization_round_trip_across_records() {
        let app = Application::new("vasp").with_version("5.4.4");
        let executable = Executable::new("vasp_std").with_application("vasp");
        let template = Template::new("INCAR", "SYSTEM = Test");
        let flavor = Flavor::new("standard")
            .with_application_name("vasp")
            .with_executable_name("vasp_std");

        let app_restored =
            Application::from_value(Value::Object(app.to_map(ExportMode::ExcludeUnset))).unwrap();
        let exe_restored =
            Executable::from_value(Value::Object(executable.to_map(ExportMode::ExcludeUnset)))
                .unwrap();
        let tmpl_restored =
            Template::from_value(Value::Object(template.to_map(ExportMode::ExcludeUnset))).unwrap();
        let flv_restored =
            Flavor::from_value(Value::Object(flavor.to_map(ExportMode::ExcludeUnset))).unwrap();

        assert_eq!(app_restored, app);
        assert_eq!(exe_restored, executable);
        assert_eq!(tmpl_restored, template);
        assert_eq!(flv_restored, flavor);
    }
}
