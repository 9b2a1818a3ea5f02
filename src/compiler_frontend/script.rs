use crate::compiler_frontend::ast::ast_nodes::Const;
use crate::compiler_frontend::text_slice::TextSlice;
use crate::compiler_frontend::wasm_module::wasm_module::Module;
use serde_json::{Value, json};

/// `(invoke "name" args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Invoke {
    pub name: TextSlice,
    pub args: Vec<Const>,
}

impl Invoke {
    pub fn new(name: &str, args: Vec<Const>) -> Self {
        Self {
            name: TextSlice::from(name),
            args,
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "name": self.name.to_str_lossy(),
            "args": self.args,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    Module(Module),
    Invoke(Invoke),
    AssertInvalid {
        module: Module,
        // Expected failure message
        text: TextSlice,
    },
    AssertReturn {
        invoke: Invoke,
        // None when the invoked func returns nothing
        expected: Option<Const>,
    },
    AssertReturnNan {
        invoke: Invoke,
    },
    AssertTrap {
        invoke: Invoke,
        text: TextSlice,
    },
}

impl Command {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Command::Module(_) => "module",
            Command::Invoke(_) => "invoke",
            Command::AssertInvalid { .. } => "assert_invalid",
            Command::AssertReturn { .. } => "assert_return",
            Command::AssertReturnNan { .. } => "assert_return_nan",
            Command::AssertTrap { .. } => "assert_trap",
        }
    }

    pub fn invoke(&self) -> Option<&Invoke> {
        match self {
            Command::Invoke(invoke)
            | Command::AssertReturn { invoke, .. }
            | Command::AssertReturnNan { invoke }
            | Command::AssertTrap { invoke, .. } => Some(invoke),
            Command::Module(_) | Command::AssertInvalid { .. } => None,
        }
    }

    pub fn module(&self) -> Option<&Module> {
        match self {
            Command::Module(module) | Command::AssertInvalid { module, .. } => Some(module),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut entry = json!({ "type": self.kind_name() });

        if let Some(module) = self.module() {
            entry["module"] = module_summary(module);
        }

        if let Some(invoke) = self.invoke() {
            entry["invoke"] = invoke.to_json();
        }

        match self {
            Command::AssertInvalid { text, .. } | Command::AssertTrap { text, .. } => {
                entry["text"] = json!(text.to_str_lossy());
            }
            Command::AssertReturn {
                expected: Some(expected),
                ..
            } => {
                entry["expected"] = json!(expected);
            }
            _ => {}
        }

        entry
    }
}

fn module_summary(module: &Module) -> Value {
    let exports: Vec<_> = module
        .exports()
        .map(|export| export.name.to_str_lossy().into_owned())
        .collect();

    json!({
        "funcs": module.num_funcs(),
        "imports": module.num_imports(),
        "func_types": module.num_func_types(),
        "exports": exports,
        "globals": module.globals.types,
        "has_memory": module.memory().is_some(),
        "has_table": module.table().is_some(),
    })
}

/// A test script, a list of commands run in order
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Summary of every command for drivers that want JSON instead of the AST
    pub fn to_json(&self) -> Value {
        let commands: Vec<Value> = self.commands.iter().map(Command::to_json).collect();
        json!({ "commands": commands })
    }
}
