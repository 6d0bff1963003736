//! 属性值与用户数据（UserData）定义
//!
//! 节点、边、子图和图本身都带有一个开放的键值注解表。

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 属性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<PropertyValue>),
    Map(HashMap<String, PropertyValue>),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::UInt(_) => "uint",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::Bytes(_) => "bytes",
            PropertyValue::List(_) => "list",
            PropertyValue::Map(_) => "map",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            PropertyValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::UInt(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::String(v) => write!(f, "{}", v),
            PropertyValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            PropertyValue::List(v) => write!(f, "<list of {}>", v.len()),
            PropertyValue::Map(v) => write!(f, "<map of {}>", v.len()),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<u64> for PropertyValue {
    fn from(v: u64) -> Self {
        PropertyValue::UInt(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(v: Vec<u8>) -> Self {
        PropertyValue::Bytes(v)
    }
}

/// 可以放进用户数据的值
///
/// 任何 `Clone + PartialEq + Debug + Send + Sync + 'static` 的类型都自动满足。
/// 克隆和比较需要经过类型擦除，因此由这里提供对象安全的版本。
pub trait UserPayload: Any + Send + Sync + fmt::Debug {
    fn clone_payload(&self) -> Box<dyn UserPayload>;
    fn eq_payload(&self, other: &dyn UserPayload) -> bool;
    fn payload_any(&self) -> &dyn Any;
}

impl<T> UserPayload for T
where
    T: Any + Send + Sync + fmt::Debug + Clone + PartialEq,
{
    fn clone_payload(&self) -> Box<dyn UserPayload> {
        Box::new(self.clone())
    }

    fn eq_payload(&self, other: &dyn UserPayload) -> bool {
        other
            .payload_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn payload_any(&self) -> &dyn Any {
        self
    }
}

/// 可以作为用户数据键的值
///
/// 任何 `Eq + Hash + Debug + Send + Sync + 'static` 的类型都自动满足。
/// 不同类型的键永不相等。
pub trait KeyPayload: Any + Send + Sync + fmt::Debug {
    fn eq_key(&self, other: &dyn KeyPayload) -> bool;
    fn hash_key(&self, state: &mut dyn Hasher);
    fn key_any(&self) -> &dyn Any;
}

impl<T> KeyPayload for T
where
    T: Any + Send + Sync + fmt::Debug + Eq + Hash,
{
    fn eq_key(&self, other: &dyn KeyPayload) -> bool {
        other
            .key_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn hash_key(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }

    fn key_any(&self) -> &dyn Any {
        self
    }
}

/// 用户数据键
///
/// 不透明的可哈希令牌。字符串键统一存为 `String`，
/// 因此 `"color"` 与 `String::from("color")` 是同一个键。
#[derive(Debug, Clone)]
pub struct UserKey(Arc<dyn KeyPayload>);

impl UserKey {
    pub fn new<K: KeyPayload>(key: K) -> Self {
        Self(Arc::new(key))
    }

    pub fn downcast_ref<K: 'static>(&self) -> Option<&K> {
        self.0.key_any().downcast_ref::<K>()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<String>().map(String::as_str)
    }
}

impl PartialEq for UserKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.eq_key(&*other.0)
    }
}

impl Eq for UserKey {}

impl Hash for UserKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_key(state);
    }
}

impl From<&str> for UserKey {
    fn from(key: &str) -> Self {
        UserKey::new(key.to_string())
    }
}

impl From<String> for UserKey {
    fn from(key: String) -> Self {
        UserKey::new(key)
    }
}

impl From<&UserKey> for UserKey {
    fn from(key: &UserKey) -> Self {
        key.clone()
    }
}

/// 用户数据值
///
/// 共享单元：克隆 `UserValue` 得到的是同一个单元的别名，
/// 通过任一别名 `set` 的新值对所有别名可见。
/// 图合并时按引用拷贝的正是这个单元，需要独立副本时使用 [`UserValue::deep_clone`]。
///
/// 单元内可以是任意 [`UserPayload`]；基本类型经 `From` 转换时存为 [`PropertyValue`]。
#[derive(Debug, Clone)]
pub struct UserValue(Arc<RwLock<Box<dyn UserPayload>>>);

impl UserValue {
    pub fn new<T: UserPayload>(value: T) -> Self {
        let payload: Box<dyn UserPayload> = Box::new(value);
        Self(Arc::new(RwLock::new(payload)))
    }

    /// 读取当前值的副本；类型不符时返回 `None`
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.with(T::clone)
    }

    /// 读取 [`PropertyValue`] 形式的值
    pub fn property(&self) -> Option<PropertyValue> {
        self.get::<PropertyValue>()
    }

    /// 在读锁内访问值，避免克隆
    pub fn with<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.0.read();
        (**guard).payload_any().downcast_ref::<T>().map(f)
    }

    /// 当前值是否为类型 `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.0.read().payload_any().is::<T>()
    }

    /// 替换当前值（对所有别名可见），新值可以是不同类型
    pub fn set<T: UserPayload>(&self, value: T) {
        *self.0.write() = Box::new(value);
    }

    /// 是否与另一个值共享同一个单元
    pub fn ptr_eq(&self, other: &UserValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// 创建一个不共享单元的独立副本
    pub fn deep_clone(&self) -> Self {
        let payload = self.0.read().clone_payload();
        Self(Arc::new(RwLock::new(payload)))
    }
}

impl PartialEq for UserValue {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let other = other.0.read();
        self.0.read().eq_payload(&**other)
    }
}

impl From<PropertyValue> for UserValue {
    fn from(v: PropertyValue) -> Self {
        UserValue::new(v)
    }
}

impl From<bool> for UserValue {
    fn from(v: bool) -> Self {
        UserValue::new(PropertyValue::from(v))
    }
}

impl From<i64> for UserValue {
    fn from(v: i64) -> Self {
        UserValue::new(PropertyValue::from(v))
    }
}

impl From<u64> for UserValue {
    fn from(v: u64) -> Self {
        UserValue::new(PropertyValue::from(v))
    }
}

impl From<f64> for UserValue {
    fn from(v: f64) -> Self {
        UserValue::new(PropertyValue::from(v))
    }
}

impl From<String> for UserValue {
    fn from(v: String) -> Self {
        UserValue::new(PropertyValue::from(v))
    }
}

impl From<&str> for UserValue {
    fn from(v: &str) -> Self {
        UserValue::new(PropertyValue::from(v))
    }
}

/// 用户数据映射
///
/// 键为不透明的 [`UserKey`]，值为共享的 [`UserValue`]，迭代顺序无意义。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
    entries: HashMap<UserKey, UserValue>,
}

impl UserData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: impl Into<UserKey>) -> Option<&UserValue> {
        self.entries.get(&key.into())
    }

    /// 读取键对应的值副本；不存在或类型不符时返回 `None`
    pub fn value<T: Clone + 'static>(&self, key: impl Into<UserKey>) -> Option<T> {
        self.get(key).and_then(UserValue::get::<T>)
    }

    /// 读取键对应的 [`PropertyValue`]
    pub fn property(&self, key: impl Into<UserKey>) -> Option<PropertyValue> {
        self.value::<PropertyValue>(key)
    }

    /// 以新单元插入值
    pub fn insert(
        &mut self,
        key: impl Into<UserKey>,
        value: impl Into<UserValue>,
    ) -> Option<UserValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// 插入一个已有单元（与调用方共享）
    pub fn insert_shared(&mut self, key: impl Into<UserKey>, value: UserValue) -> Option<UserValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: impl Into<UserKey>) -> Option<UserValue> {
        self.entries.remove(&key.into())
    }

    pub fn contains_key(&self, key: impl Into<UserKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> hash_map::Iter<'_, UserKey, UserValue> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &UserKey> {
        self.entries.keys()
    }

    /// 浅拷贝 `other` 的所有条目，同名键被覆盖。
    ///
    /// 值按引用共享：之后对任一侧 `UserValue::set` 的修改两侧都可见。
    pub fn extend_shared(&mut self, other: &UserData) {
        for (key, value) in &other.entries {
            self.insert_shared(key, value.clone());
        }
    }

    /// 深拷贝：返回一个所有值都不共享单元的副本
    pub fn deep_clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_clone()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UserData {
    type Item = (&'a UserKey, &'a UserValue);
    type IntoIter = hash_map::Iter<'a, UserKey, UserValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<UserKey>, V: Into<UserValue>> FromIterator<(K, V)> for UserData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
