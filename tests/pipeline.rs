//! End-to-end pipeline tests over an in-memory file set.

use apilens::{
    build_library, emit, AnalysisContext, DeclarationKind, PackageMeta, ProgramIndex, SourceFile,
    SourceOptions,
};

fn options() -> SourceOptions {
    SourceOptions {
        source_dirs: vec!["/pkg/src".to_string()],
        ..SourceOptions::default()
    }
}

fn meta() -> PackageMeta {
    PackageMeta {
        name: "widgets".to_string(),
        version: "2.0.0".to_string(),
        description: Some("A widget library".to_string()),
        repository: None,
    }
}

fn fixture_files() -> Vec<SourceFile> {
    vec![
        SourceFile::new("/pkg/src/index.ts").with_content(
            "export * from './util/math';\nexport { Button as PrimaryButton } from './Button.svelte';\n",
        ),
        SourceFile::new("/pkg/src/util/math.ts")
            .with_content(
                "/** Math helpers. */\n\n/** Clamp a value into a range. */\nexport function clamp(value: number, min: number, max: number): number {\n    return value;\n}\n\nexport const EPSILON: number = 0.0001;\n",
            )
            .with_dependents(vec!["/pkg/src/index.ts".into()]),
        SourceFile::new("/pkg/src/Button.svelte")
            .with_content(
                "<script lang=\"ts\">\n/** A clickable button. */\nexport let label: string;\nexport let disabled: boolean = false;\n</script>\n\n<button disabled={disabled}>{label}</button>\n",
            )
            .with_dependents(vec!["/pkg/src/index.ts".into()]),
    ]
}

fn run_fixture() -> (apilens::LibraryModel, AnalysisContext) {
    let files = fixture_files();
    let program = ProgramIndex::load(&files).unwrap();
    let mut ctx = AnalysisContext::new();
    let model = build_library(files, &options(), &program, meta(), true, &mut ctx).unwrap();
    (model, ctx)
}

#[test]
fn modules_sorted_by_path() {
    let (model, _) = run_fixture();
    let paths: Vec<&str> = model.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, vec!["Button.svelte", "index.ts", "util/math.ts"]);
}

#[test]
fn declarations_and_comments_extracted() {
    let (model, ctx) = run_fixture();
    assert!(ctx.is_ok());

    let math = &model.modules[2];
    assert_eq!(math.comment.as_deref(), Some("Math helpers."));
    assert_eq!(math.declarations[0].name, "clamp");
    assert_eq!(math.declarations[0].kind, DeclarationKind::Function);
    assert_eq!(
        math.declarations[0].comment.as_deref(),
        Some("Clamp a value into a range.")
    );
    assert_eq!(math.declarations[1].name, "EPSILON");

    let button = &model.modules[0];
    assert_eq!(button.declarations[0].name, "Button");
    assert_eq!(button.declarations[0].kind, DeclarationKind::Component);
    let props = button.declarations[0].props.as_ref().unwrap();
    assert_eq!(props[0].name, "label");
    assert!(props[0].required);
    assert!(!props[1].required);
}

#[test]
fn star_export_linked_without_duplicating_declarations() {
    let (model, _) = run_fixture();

    let index = &model.modules[1];
    assert!(index.declarations.is_empty());
    assert_eq!(index.star_exports, vec!["util/math"]);
    assert_eq!(index.re_exports.len(), 1);
    assert_eq!(index.re_exports[0].local_name, "PrimaryButton");
    assert_eq!(index.re_exports[0].exported_name, "Button");

    assert_eq!(model.also_exported_from["clamp"], vec!["util/math.ts"]);
    assert_eq!(model.also_exported_from["EPSILON"], vec!["util/math.ts"]);
}

#[test]
fn dependency_arrays_always_present() {
    let (model, _) = run_fixture();
    for module in &model.modules {
        // Materialized vectors, possibly empty, sorted when non-empty.
        let mut sorted = module.dependencies.clone();
        sorted.sort();
        assert_eq!(sorted, module.dependencies);
    }
    assert_eq!(model.modules[2].dependents, vec!["index.ts"]);
}

#[test]
fn rerun_on_unchanged_input_is_byte_identical() {
    let (first, _) = run_fixture();
    let (second, _) = run_fixture();
    assert_eq!(
        emit::to_canonical_json(&first),
        emit::to_canonical_json(&second)
    );
}

#[test]
fn empty_source_set_is_a_valid_library() {
    let program = ProgramIndex::new();
    let mut ctx = AnalysisContext::new();
    let model = build_library(Vec::new(), &options(), &program, meta(), true, &mut ctx).unwrap();

    assert!(model.modules.is_empty());
    assert!(ctx.is_ok());
    assert_eq!(ctx.warning_count(), 1);

    let json = emit::to_canonical_json(&model);
    assert!(json.contains("\"modules\": []"));
}

#[test]
fn file_missing_from_program_is_skipped_with_warning() {
    let mut files = fixture_files();
    files.push(SourceFile::new("/pkg/src/ghost.ts"));
    let program = ProgramIndex::load(&fixture_files()).unwrap();
    let mut ctx = AnalysisContext::new();

    let model = build_library(files, &options(), &program, meta(), true, &mut ctx).unwrap();
    assert_eq!(model.modules.len(), 3);
    assert!(ctx.is_ok());
    assert_eq!(ctx.warning_count(), 1);
}

#[test]
fn broken_component_fails_the_run() {
    let files = vec![SourceFile::new("/pkg/src/Broken.svelte")
        .with_content("<script>\nexport let a: string;\n</script>\n<p>{a</p>\n")];
    let program = ProgramIndex::load(&files).unwrap();
    let mut ctx = AnalysisContext::new();

    let err = build_library(files, &options(), &program, meta(), true, &mut ctx).unwrap_err();
    assert!(err.to_string().contains("Broken.svelte"));
}
