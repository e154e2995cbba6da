//! End-to-end compilation of the demo pipeline, asserted verbatim.

use pipegraf::model::{Pipeline, example_pipeline};
use pipegraf::render::render;
use pipegraf::store::{ConfigStore, MemoryStore};
use pretty_assertions::assert_eq;

const EXPECTED: &str = r#"[agent]
  interval = "10s"
  round_interval = true
  metric_batch_size = 1000
  metric_buffer_limit = 10000
  collection_jitter = "0s"
  flush_interval = "10s"
  flush_jitter = "0s"
  precision = ""
  debug = false
  quiet = false
  logtarget = "file"
  logfile = ""
  logfile_rotation_interval = "0d"
  logfile_rotation_max_size = "0MB"
  logfile_rotation_max_archives = 5

[[secretstores.os]]

[[inputs.cpu]]
  percpu = true
  totalcpu = true
  collect_cpu_time = false
  report_active = false

[[inputs.mem]]

[[processors.converter]]
  fields = {integer = ["usage_*"]}

[[outputs.influxdb_v2]]
  namepass = ["cpu"]
  urls = ["http://localhost:8086"]
  token = "@{mystore:influx_token}"
  organization = "my-org"
  bucket = "telegraf"

[[outputs.file]]
  namepass = ["mem"]
  files = ["stdout", "/tmp/metrics.out"]
  rotation_interval = "1d"
  data_format = "influx"
"#;

#[test]
fn demo_pipeline_compiles_to_the_expected_document() {
    let doc = render(&example_pipeline()).unwrap();
    assert_eq!(doc, EXPECTED);
}

#[test]
fn compilation_survives_a_json_round_trip() {
    let pipeline = example_pipeline();
    let blob = pipeline.to_json().unwrap();
    let reloaded = Pipeline::from_json(&blob).unwrap();
    assert_eq!(render(&reloaded).unwrap(), EXPECTED);
}

#[test]
fn legacy_blob_compiles_after_upgrade() {
    // The plural secretStores form with {id, type, data} entries.
    let blob = serde_json::json!({
        "id": "default",
        "name": "cpu_mem_collection",
        "nodes": [
            { "id": "cpu1", "type": "input", "plugin": "cpu",
              "position": { "x": 0, "y": 0 }, "data": {} },
            { "id": "o1", "type": "output", "plugin": "influxdb_v2",
              "position": { "x": 0, "y": 0 },
              "data": { "token": "@{mystore:influx_token}" } }
        ],
        "connections": [
            { "id": "e1", "source": "cpu1", "target": "o1", "filters": {} }
        ],
        "secretStores": [ { "id": "mystore", "type": "os", "data": {} } ]
    })
    .to_string();

    let pipeline = Pipeline::from_json(&blob).unwrap();
    let doc = render(&pipeline).unwrap();
    assert!(doc.contains("[[secretstores.os]]"));
    assert!(doc.contains("  token = \"@{mystore:influx_token}\""));
}

#[test]
fn store_round_trip_preserves_the_compiled_output() {
    let mut store = MemoryStore::with_example();
    let record = store.list().unwrap().remove(0);
    assert_eq!(render(&record.config).unwrap(), EXPECTED);

    // Saving back an edited copy does not disturb the stored aggregate.
    let mut edited = record.config.clone();
    edited.remove_node("mem1");
    store
        .update(
            record.id,
            pipegraf::store::RecordUpdate {
                name: None,
                config: Some(edited.clone()),
            },
        )
        .unwrap();
    assert_eq!(store.get(record.id).unwrap().config, edited);
}
