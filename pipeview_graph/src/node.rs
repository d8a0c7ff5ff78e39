/// A named data type carried on node inputs and outputs.
///
/// `loadable` marks types that can be hydrated from configuration when no
/// upstream output feeds them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub loadable: bool,
}

impl TypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loadable: false,
        }
    }

    pub fn loadable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loadable: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputDef {
    pub name: String,
    pub dtype: TypeSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDef {
    pub name: String,
    pub dtype: TypeSpec,
}

/// A single named computation step with typed inputs and outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDef {
    pub name: String,
    pub description: Option<String>,
    pub inputs: Vec<InputDef>,
    pub outputs: Vec<OutputDef>,
}

impl NodeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>, dtype: TypeSpec) -> Self {
        self.inputs.push(InputDef {
            name: name.into(),
            dtype,
        });
        self
    }

    pub fn output(mut self, name: impl Into<String>, dtype: TypeSpec) -> Self {
        self.outputs.push(OutputDef {
            name: name.into(),
            dtype,
        });
        self
    }

    pub fn get_input(&self, name: &str) -> Option<&InputDef> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn get_output(&self, name: &str) -> Option<&OutputDef> {
        self.outputs.iter().find(|o| o.name == name)
    }
}
