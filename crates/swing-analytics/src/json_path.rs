//! 안전한 중첩 경로 조회.
//!
//! 어느 깊이에서든 키가 없으면 [`Lookup::Absent`]를 반환하며 패닉하지 않습니다.
//! 경로는 점으로 구분합니다 (`"moving_averages.spread_trend"`). 배열 노드에서는
//! 숫자 세그먼트를 인덱스로 해석합니다.

use serde_json::Value;

/// 조회 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// 값이 존재함
    Present(T),
    /// 경로 중 어딘가가 없음 (null 포함)
    Absent,
}

impl<T> Lookup<T> {
    /// 값 존재 여부.
    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Present(_))
    }

    /// `Option`으로 변환합니다.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Present(v) => Some(v),
            Lookup::Absent => None,
        }
    }

    /// 값에 함수를 적용합니다. `None`을 반환하면 `Absent`가 됩니다.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Option<U>) -> Lookup<U> {
        match self {
            Lookup::Present(v) => f(v).into(),
            Lookup::Absent => Lookup::Absent,
        }
    }

    /// `Absent`이면 대안을 시도합니다.
    pub fn or_else(self, f: impl FnOnce() -> Lookup<T>) -> Lookup<T> {
        match self {
            Lookup::Present(_) => self,
            Lookup::Absent => f(),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Present(v),
            None => Lookup::Absent,
        }
    }
}

/// 경로 조회가 가능한 트리 노드.
pub trait PathNode {
    /// 키(또는 인덱스)에 해당하는 자식 노드.
    fn child(&self, key: &str) -> Option<&Self>;

    /// "값 없음"으로 취급할 노드인지.
    fn is_null(&self) -> bool {
        false
    }
}

impl PathNode for Value {
    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// 점으로 구분된 경로를 조회합니다.
///
/// ```
/// use serde_json::json;
/// use swing_analytics::json_path::{lookup, Lookup};
///
/// let doc = json!({"rsi": {"value": 61.2}, "beta": null});
/// assert_eq!(lookup(&doc, "rsi.value"), Lookup::Present(&json!(61.2)));
/// assert_eq!(lookup(&doc, "rsi.comment"), Lookup::Absent);
/// assert_eq!(lookup(&doc, "beta"), Lookup::Absent);
/// assert_eq!(lookup(&doc, "macd.cross.state"), Lookup::Absent);
/// ```
pub fn lookup<'a, N: PathNode>(root: &'a N, path: &str) -> Lookup<&'a N> {
    let mut current = root;
    for segment in path.split('.') {
        match current.child(segment) {
            Some(next) => current = next,
            None => return Lookup::Absent,
        }
    }
    if current.is_null() {
        Lookup::Absent
    } else {
        Lookup::Present(current)
    }
}

/// 후보 경로를 순서대로 조회하여 `extract`가 값을 돌려주는 첫 결과를 반환합니다.
///
/// 경로가 존재하더라도 `extract`가 `None`이면(타입 불일치) 다음 후보로 넘어갑니다.
pub fn first_present<'a, N, T>(
    root: &'a N,
    candidates: &[&str],
    extract: impl Fn(&'a N) -> Option<T>,
) -> Lookup<T>
where
    N: PathNode,
{
    candidates
        .iter()
        .find_map(|path| lookup(root, path).and_then(&extract).into_option())
        .into()
}
