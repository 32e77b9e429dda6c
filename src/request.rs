use crate::value::Value;

/// Accumulates a method name and an ordered list of call parameters.
///
/// The builder is mutable; the encoded document is produced separately, so a
/// request can be reused or adjusted between calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    method: String,
    params: Vec<Value>,
}

impl Request {
    /// Creates a request with no parameters.
    pub fn new<S: Into<String>>(method: S) -> Request {
        Request {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Creates a request with the given parameters, in order.
    pub fn with_params<S, I, V>(method: S, params: I) -> Request
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Request {
            method: method.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the remote method to call.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn set_method<S: Into<String>>(&mut self, method: S) {
        self.method = method.into();
    }

    /// Appends one parameter.
    pub fn add_param<V: Into<Value>>(&mut self, param: V) -> &mut Request {
        self.params.push(param.into());
        self
    }

    /// Appends every parameter of `params`, in order.
    pub fn add_params<I, V>(&mut self, params: I) -> &mut Request
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Collects `items` into a single array parameter.
    pub fn add_param_array<I, V>(&mut self, items: I) -> &mut Request
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add_param(items.into_iter().collect::<Value>())
    }

    /// Collects `members` into a single struct parameter.
    ///
    /// A repeated member name keeps the last value.
    pub fn add_param_struct<I, K, V>(&mut self, members: I) -> &mut Request
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_param(members.into_iter().collect::<Value>())
    }

    /// The parameter at `pos`, if present.
    pub fn param(&self, pos: usize) -> Option<&Value> {
        self.params.get(pos)
    }

    /// A copy of the parameter list, not a live view.
    pub fn params(&self) -> Vec<Value> {
        self.params.clone()
    }

    pub fn params_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Removes the first parameter equal to `param`, reporting whether one
    /// was found.
    pub fn remove_param(&mut self, param: &Value) -> bool {
        match self.params.iter().position(|p| p == param) {
            Some(pos) => {
                self.params.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the parameter at `pos`, if present.
    pub fn remove_param_at(&mut self, pos: usize) -> Option<Value> {
        if pos < self.params.len() {
            Some(self.params.remove(pos))
        } else {
            None
        }
    }

    /// Drops every parameter, keeping the method name.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub(crate) fn params_iter(&self) -> std::slice::Iter<'_, Value> {
        self.params.iter()
    }
}
