use crate::errors::RunError;
use serde_json::Value;

#[derive(Debug, Clone)]
enum PathSegment {
    Key(String),
    Index(usize),
}

fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    for ch in path.trim().chars() {
        match ch {
            '.' if !in_brackets => {
                push_segment(&mut segments, &current);
                current.clear();
            }
            '[' => {
                push_segment(&mut segments, &current);
                current.clear();
                in_brackets = true;
            }
            ']' => {
                push_segment(&mut segments, &current);
                current.clear();
                in_brackets = false;
            }
            _ => current.push(ch),
        }
    }
    push_segment(&mut segments, &current);
    segments
}

fn push_segment(segments: &mut Vec<PathSegment>, raw: &str) {
    let trimmed = raw.trim().trim_matches('"').trim_matches('\'').trim();
    if trimmed.is_empty() {
        return;
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        segments.push(PathSegment::Index(index));
    } else {
        segments.push(PathSegment::Key(trimmed.to_string()));
    }
}

/// Walks `path` ("a.b[0].c") into `target`. A missing step yields `None`,
/// never an error.
pub fn get_path(target: &Value, path: &str) -> Option<Value> {
    if path.trim().is_empty() {
        return Some(target.clone());
    }
    let mut current = target;
    for segment in parse_path(path) {
        current = match segment {
            PathSegment::Key(key) => current.get(&key)?,
            PathSegment::Index(index) => current.as_array()?.get(index)?,
        };
    }
    Some(current.clone())
}

pub fn get_path_required(target: &Value, path: &str) -> Result<Value, RunError> {
    get_path(target, path)
        .ok_or_else(|| RunError::param(format!("Path '{}' not found in result", path)))
}
