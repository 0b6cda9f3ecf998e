use fieldop_eval::{Pipeline, PipelineOutcome, Registry, compile_asset};
use fieldop_parser::parse_asset_yaml;
use serde_json::Value;

pub fn pipeline(yaml: &str) -> Pipeline {
    let asset = parse_asset_yaml(yaml).unwrap();
    compile_asset(&asset, &Registry::with_defaults()).unwrap()
}

pub fn apply(yaml: &str, event: &mut Value) -> PipelineOutcome {
    pipeline(yaml).apply(event)
}
