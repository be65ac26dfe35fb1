use crate::{
    config::OpenApiConfig,
    error::OpenApiResult,
    registry::DocumentRegistry,
    route::{BodySpec, RouteDocEntry, JSON_CONTENT_TYPE},
    security::compile_security,
    specification::*,
    utils::{convert_path, path_param_names},
};
use docroute_validation::{SchemaGenerator, SchemaRef};
use schemars::schema::{InstanceType, Schema, SchemaObject};
use std::collections::BTreeMap;
use tracing::info;

/// Description attached to every documented 200 response
pub const SUCCESS_DESCRIPTION: &str = "Successful response";

/// Compiles aggregated route entries into an OpenAPI document
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    config: OpenApiConfig,
}

impl OpenApiGenerator {
    pub fn new(config: OpenApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    /// Compile `entries`, in order, into a document.
    ///
    /// Fails on the first entry whose security declaration cannot be compiled or
    /// whose path and method were already documented.
    pub fn generate(&self, entries: &[RouteDocEntry]) -> OpenApiResult<OpenApiSpec> {
        let mut registry = DocumentRegistry::new();
        for entry in entries {
            self.process_entry(&mut registry, entry)?;
        }

        let operations = registry.operation_count();
        let spec = registry.into_spec(&self.config);
        info!(
            title = %spec.info.title,
            operations,
            paths = spec.paths.len(),
            "Compiled API document"
        );
        Ok(spec)
    }

    fn process_entry(
        &self,
        registry: &mut DocumentRegistry,
        entry: &RouteDocEntry,
    ) -> OpenApiResult<()> {
        let path = convert_path(&entry.path);
        let spec = &entry.spec;

        let security = match &spec.security {
            Some(declaration) => {
                let compiled =
                    compile_security(declaration, &self.config.default_security_scheme)?;
                let requirement = compiled.requirement();
                registry.register_security(compiled);
                vec![requirement]
            }
            None => Vec::new(),
        };

        let gen = registry.schema_generator();
        let mut parameters = Vec::new();
        if let Some(params) = &spec.params {
            parameters.extend(object_parameters(gen, params, "path"));
        }
        for name in path_param_names(&entry.path) {
            let declared = parameters
                .iter()
                .any(|p: &Parameter| p.location == "path" && p.name == name);
            if !declared {
                parameters.push(Parameter {
                    name,
                    location: "path".to_string(),
                    description: None,
                    required: true,
                    schema: Some(string_schema()),
                });
            }
        }
        if let Some(query) = &spec.query {
            parameters.extend(object_parameters(gen, query, "query"));
        }

        let request_body = spec.body.as_ref().map(|body| request_body(gen, body));
        let responses = responses(gen, spec.response.as_ref());

        let operation = Operation {
            tags: entry.tags.clone().unwrap_or_default(),
            summary: spec.summary.clone(),
            description: spec.description.clone(),
            operation_id: spec.operation_id.clone(),
            parameters,
            request_body,
            responses,
            security,
            deprecated: spec.deprecated.then_some(true),
        };

        registry.register_operation(path, entry.method, operation)
    }
}

/// One parameter per property of an object schema.
/// Path parameters are always required; query parameters follow the schema.
fn object_parameters(gen: &mut SchemaGenerator, schema: &SchemaRef, location: &str) -> Vec<Parameter> {
    let object = schema.json_schema(gen);
    let Some(validation) = object.object else {
        return Vec::new();
    };
    let validation = *validation;

    validation
        .properties
        .into_iter()
        .map(|(name, property)| {
            let description = match &property {
                Schema::Object(obj) => obj.metadata.as_ref().and_then(|m| m.description.clone()),
                Schema::Bool(_) => None,
            };
            Parameter {
                required: location == "path" || validation.required.contains(&name),
                location: location.to_string(),
                description,
                schema: Some(property),
                name,
            }
        })
        .collect()
}

fn request_body(gen: &mut SchemaGenerator, body: &BodySpec) -> RequestBody {
    let content = match body {
        BodySpec::Single(schema) => {
            let mut content = BTreeMap::new();
            content.insert(JSON_CONTENT_TYPE.to_string(), media_type(gen, schema));
            content
        }
        BodySpec::ByContentType(entries) => entries
            .iter()
            .map(|(content_type, schema)| (content_type.clone(), media_type(gen, schema)))
            .collect(),
    };

    RequestBody {
        description: None,
        content,
        required: Some(true),
    }
}

fn responses(gen: &mut SchemaGenerator, response: Option<&SchemaRef>) -> BTreeMap<String, Response> {
    let mut content = BTreeMap::new();
    if let Some(schema) = response {
        content.insert(JSON_CONTENT_TYPE.to_string(), media_type(gen, schema));
    }

    let mut responses = BTreeMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: SUCCESS_DESCRIPTION.to_string(),
            content,
        },
    );
    responses
}

fn media_type(gen: &mut SchemaGenerator, schema: &SchemaRef) -> MediaType {
    MediaType {
        schema: Some(Schema::Object(schema.json_schema(gen))),
    }
}

fn string_schema() -> Schema {
    Schema::Object(SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        ..Default::default()
    })
}
