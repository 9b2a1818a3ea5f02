#![cfg(test)]

use crate::compiler_frontend::named_types::ValueType;
use crate::compiler_frontend::tests::test_support::{name, named_types};
use crate::compiler_frontend::var::Var;
use crate::compiler_frontend::wasm_module::module_entities::{
    Export, Func, FuncSignature, FuncType, Import, Memory, ModuleField, Segment,
};
use crate::compiler_frontend::wasm_module::wasm_module::Module;

fn empty_func(func_name: Option<&str>) -> Func {
    Func::new(
        func_name.map(name),
        None,
        Default::default(),
        ValueType::Void,
        Default::default(),
        Vec::new(),
    )
    .unwrap()
}

fn export(export_name: &str, var: Var) -> Export {
    Export {
        name: name(export_name),
        var,
    }
}

/// `foo` at 0, `bar` at 1 and an unnamed func at 2
fn foo_bar_module() -> Module {
    let mut module = Module::new();
    module.add_func(empty_func(Some("foo"))).unwrap();
    module.add_func(empty_func(Some("bar"))).unwrap();
    module.add_func(empty_func(None)).unwrap();
    module
}

#[test]
fn funcs_resolve_by_name_and_index() {
    let module = foo_bar_module();

    assert_eq!(module.num_funcs(), 3);
    assert_eq!(module.func_index_by_var(&Var::name("bar")), Some(1));
    assert_eq!(module.func_index_by_var(&Var::name("missing")), None);
    assert_eq!(module.func_index_by_var(&Var::from(9)), Some(9));
}

#[test]
fn func_by_var_checks_the_range() {
    let module = foo_bar_module();

    assert_eq!(
        module.func_by_var(&Var::name("foo")).and_then(|func| func.name.clone()),
        Some(name("foo"))
    );
    assert!(module.func_by_var(&Var::from(2)).is_some());
    assert!(module.func_by_var(&Var::from(3)).is_none());
    assert!(module.func_by_var(&Var::name("missing")).is_none());
}

#[test]
fn export_lookup_by_name() {
    let mut module = Module::new();
    module
        .add_memory(Memory {
            initial_pages: 1,
            max_pages: 2,
            segments: vec![Segment {
                addr: 16,
                data: b"hello".to_vec(),
            }],
        })
        .unwrap();
    module.add_export(export("memory", Var::from(0))).unwrap();

    let found = module.export_by_name(&name("memory")).unwrap();
    assert_eq!(found.var, Var::from(0));
    assert!(module.export_by_name(&name("table")).is_none());
    assert_eq!(module.memory().map(|memory| memory.segments.len()), Some(1));
}

#[test]
fn func_exported_by_name() {
    let mut module = foo_bar_module();
    module.add_export(export("run", Var::name("bar"))).unwrap();

    assert!(module.is_func_exported(module.func(1).unwrap()));
    assert!(!module.is_func_exported(module.func(0).unwrap()));
    // Unnamed funcs can't match a name export
    assert!(!module.is_func_exported(module.func(2).unwrap()));
}

#[test]
fn func_exported_by_index_is_matched_by_identity() {
    let mut module = foo_bar_module();
    module.add_export(export("anon", Var::from(2))).unwrap();

    let exported = module.func(2).unwrap();
    assert!(module.is_func_exported(exported));

    // An equal func that doesn't live in this module is not the exported one
    let detached = exported.clone();
    assert!(!module.is_func_exported(&detached));
}

#[test]
fn export_past_the_end_of_the_func_list_matches_nothing() {
    let mut module = foo_bar_module();
    module.add_export(export("ghost", Var::from(40))).unwrap();

    assert!(module.funcs().all(|func| !module.is_func_exported(func)));
}

#[test]
fn global_fields_are_concatenated() {
    let mut module = Module::new();
    module
        .add_global(named_types(&[("$a", ValueType::I32), ("$b", ValueType::F32)]))
        .unwrap();
    module.add_global(named_types(&[("$c", ValueType::I64)])).unwrap();

    assert_eq!(module.globals.types, vec![ValueType::I32, ValueType::F32, ValueType::I64]);
    assert_eq!(module.global_index_by_var(&Var::name("$c")), Some(2));
    assert_eq!(module.global_type_by_var(&Var::name("$b")), Some(ValueType::F32));
    assert_eq!(module.global_type_by_var(&Var::from(3)), None);
}

#[test]
fn imports_and_func_types_resolve() {
    let mut module = Module::new();
    let sig = FuncSignature {
        result_type: ValueType::I32,
        param_types: vec![ValueType::I32],
    };

    module
        .add_func_type(FuncType {
            name: Some(name("$unary")),
            sig: sig.clone(),
        })
        .unwrap();
    module
        .add_import(Import {
            name: Some(name("$print")),
            module_name: name("env"),
            func_name: name("print_i32"),
            type_var: Some(Var::name("$unary")),
            func_sig: sig.clone(),
        })
        .unwrap();

    let import = module.import_by_var(&Var::name("$print")).unwrap();
    assert_eq!(import.func_name, name("print_i32"));

    let func_type = module.func_type_by_var(import.type_var.as_ref().unwrap()).unwrap();
    assert_eq!(func_type.sig, sig);
    assert_eq!(module.func_type_index_by_var(&Var::name("$unary")), Some(0));
    assert!(module.import_by_var(&Var::from(1)).is_none());
}

#[test]
fn fields_keep_declaration_order() {
    let mut module = Module::new();
    module.add_func_type(FuncType { name: None, sig: FuncSignature::default() }).unwrap();
    module.add_func(empty_func(Some("main"))).unwrap();
    module.add_table(vec![Var::name("main"), Var::from(0)]).unwrap();
    module.add_start(Var::name("main")).unwrap();
    module.add_export(export("main", Var::name("main"))).unwrap();

    let kinds: Vec<&str> = module.fields().iter().map(ModuleField::kind_name).collect();
    assert_eq!(kinds, vec!["type", "func", "table", "start", "export"]);

    assert_eq!(module.table().map(<[Var]>::len), Some(2));
    assert_eq!(module.start(), Some(&Var::name("main")));
    assert_eq!(module.num_exports(), 1);
    assert_eq!(module.num_func_types(), 1);
}

#[test]
fn later_singleton_declarations_replace_earlier_ones() {
    let mut module = Module::new();
    module.add_start(Var::from(0)).unwrap();
    module.add_start(Var::from(1)).unwrap();

    assert_eq!(module.start(), Some(&Var::from(1)));
    assert_eq!(module.fields().len(), 2);
}

#[test]
fn many_funcs_grow_the_func_table() {
    let mut module = Module::new();
    for i in 0..40 {
        module.add_func(empty_func(Some(&format!("$f{i}")))).unwrap();
    }

    assert_eq!(module.func_bindings.capacity(), 64);
    for i in 0..40u32 {
        assert_eq!(module.func_index_by_var(&Var::name(&format!("$f{i}"))), Some(i));
    }
}

#[test]
fn adding_globals_shares_names_with_the_fields_and_keeps_earlier_ones() {
    let mut module = Module::new();
    module.add_global(named_types(&[("$first", ValueType::I32)])).unwrap();
    module.add_global(named_types(&[("$second", ValueType::F64)])).unwrap();

    let ModuleField::Global(first_field) = &module.fields()[0] else {
        panic!("expected a global field");
    };
    let field_name = &first_field.bindings.iter().next().unwrap().name;
    let global_name = module
        .globals
        .bindings
        .iter()
        .find(|binding| binding.name == *field_name)
        .map(|binding| &binding.name)
        .unwrap();

    // One handle in the field and one in the concatenated list, no stale copies
    assert!(std::rc::Rc::ptr_eq(field_name.shared_bytes(), global_name.shared_bytes()));
    assert_eq!(std::rc::Rc::strong_count(field_name.shared_bytes()), 2);

    assert_eq!(module.global_index_by_var(&Var::name("$first")), Some(0));
    assert_eq!(module.global_index_by_var(&Var::name("$second")), Some(1));
    assert_eq!(module.globals.len(), 2);
}
