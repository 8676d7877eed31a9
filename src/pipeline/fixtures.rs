// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Test fixture builders for job and resource records

use serde_yaml::{Mapping, Value};

use crate::pipeline::{JobDefinition, JobLibrary, ResourceDefinition, ResourceLibrary};

pub fn record(yaml: &str) -> Mapping {
    serde_yaml::from_str(yaml).unwrap()
}

fn step(kind: &str, name: &str) -> Mapping {
    let mut step = Mapping::new();
    step.insert(kind.into(), name.into());
    step
}

pub fn get(name: &str) -> Value {
    Value::Mapping(step("get", name))
}

pub fn get_passed(name: &str, passed: &[&str]) -> Value {
    let mut step = step("get", name);
    step.insert(
        "passed".into(),
        Value::Sequence(passed.iter().map(|p| Value::from(*p)).collect()),
    );
    Value::Mapping(step)
}

pub fn put(name: &str) -> Value {
    Value::Mapping(step("put", name))
}

pub fn aggregate(steps: Vec<Value>) -> Value {
    let mut item = Mapping::new();
    item.insert("aggregate".into(), Value::Sequence(steps));
    Value::Mapping(item)
}

pub fn job(name: &str, plan: Vec<Value>) -> JobDefinition {
    let mut record = Mapping::new();
    record.insert("name".into(), name.into());
    if !plan.is_empty() {
        record.insert("plan".into(), Value::Sequence(plan));
    }
    JobDefinition::from_record(record).unwrap()
}

/// A job whose only step is a get of `<name>-input` passed through `upstream`
pub fn job_after(name: &str, upstream: &[&str]) -> JobDefinition {
    job(name, vec![get_passed(&format!("{}-input", name), upstream)])
}

pub fn library(jobs: Vec<JobDefinition>) -> JobLibrary {
    JobLibrary::new(jobs).unwrap()
}

pub fn resources(names: &[&str]) -> ResourceLibrary {
    ResourceLibrary::new(names.iter().map(|n| ResourceDefinition::named(*n)).collect()).unwrap()
}

/// Assert `earlier` appears in `order` and before every job in `later`
pub fn assert_before(order: &[&str], earlier: &str, later: &[&str]) {
    let first = order
        .iter()
        .position(|n| *n == earlier)
        .unwrap_or_else(|| panic!("expected job \"{}\" to be in list {:?}", earlier, order));
    for job in later {
        let index = order
            .iter()
            .position(|n| n == job)
            .unwrap_or_else(|| panic!("expected job \"{}\" to be in list {:?}", job, order));
        assert!(
            first < index,
            "expected job \"{}\" to be before job \"{}\" in list {:?}",
            earlier,
            job,
            order
        );
    }
}
