use bc_recipe::schema::*;
use bc_recipe::{
    RecipeError, ValidationError, load_recipe, recipe_from_json_str, recipe_from_yaml_str,
    save_recipe,
};

fn recipe() -> Recipe {
    Recipe {
        name: "Pils".to_string(),
        version: Some("1".to_string()),
        batch_size_l: 18.0,
        boil_time_min: 90.0,
        target_og_plato: 11.5,
        target_ibu: 32.0,
        mash_fermentables: vec![
            FermentableDef {
                name: "Best a-xl".to_string(),
                percent: 95.0,
            },
            FermentableDef {
                name: "Carapils".to_string(),
                percent: 5.0,
            },
        ],
        fermentor_fermentables: vec![],
        boil_hops: vec![BoilHopDef {
            name: "Saaz".to_string(),
            percent: 100.0,
            boil_time_min: Some(60.0),
        }],
        dry_hops: vec![],
    }
}

#[test]
fn roundtrip_yaml() {
    let path = std::env::temp_dir().join("bc_recipe_roundtrip.yaml");
    save_recipe(&path, &recipe()).unwrap();
    let loaded = load_recipe(&path).unwrap();
    assert_eq!(recipe(), loaded);
}

#[test]
fn roundtrip_json() {
    let path = std::env::temp_dir().join("bc_recipe_roundtrip.json");
    save_recipe(&path, &recipe()).unwrap();
    let loaded = load_recipe(&path).unwrap();
    assert_eq!(recipe(), loaded);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("bc_recipe_roundtrip.toml");
    let err = save_recipe(&path, &recipe()).unwrap_err();
    assert!(matches!(err, RecipeError::UnsupportedFormat { .. }));
}

#[test]
fn defaults_apply_to_optional_fields() {
    let yaml = r#"
batch_size_l: 10
boil_time_min: 60
target_og_plato: 10
mash_fermentables:
  - name: Pale Ale Malt
    percent: 100
"#;
    let recipe = recipe_from_yaml_str(yaml).unwrap();
    assert_eq!(recipe.name, "Unknown recipe");
    assert_eq!(recipe.target_ibu, 0.0);
    assert!(recipe.boil_hops.is_empty());
}

#[test]
fn bad_percentages_fail_on_load() {
    let yaml = r#"
batch_size_l: 10
boil_time_min: 60
target_og_plato: 10
mash_fermentables:
  - name: Pale Ale Malt
    percent: 70
"#;
    let err = recipe_from_yaml_str(yaml).unwrap_err();
    assert!(matches!(
        err,
        RecipeError::Validation(ValidationError::PercentSum { .. })
    ));
}

#[test]
fn missing_required_field_is_a_parse_error() {
    let yaml = "boil_time_min: 60\ntarget_og_plato: 10\n";
    assert!(matches!(
        recipe_from_yaml_str(yaml),
        Err(RecipeError::Yaml(_))
    ));
}

#[test]
fn json_recipe_is_validated() {
    let json = r#"{"batch_size_l": 10, "boil_time_min": 60, "target_og_plato": 10,
        "mash_fermentables": [{"name": "Pale Ale Malt", "percent": 60}]}"#;
    assert!(matches!(
        recipe_from_json_str(json),
        Err(RecipeError::Validation(ValidationError::PercentSum { .. }))
    ));
}
