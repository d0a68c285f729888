//! The typed-resource trait and the entity wrapper that binds a typed
//! payload to its [`Resource`] plumbing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::ApiClient;
use crate::wire;

use super::errors::ResourceError;
use super::resource::{CallOutcome, Resource};

/// A typed API resource.
///
/// Implementors are plain serde structs whose fields are the snake_case
/// attribute names; [`Entity`] supplies the networking around them. The
/// default `all` and `find` methods cover the read side; bindings add their
/// own mutating operations on `Entity<Self>`.
#[allow(async_fn_in_trait)]
pub trait RestResource: DeserializeOwned + Serialize + Sized {
    /// Human-readable type name, used in error messages.
    const NAME: &'static str;
    /// Resource path under the API base, e.g. `infrastructure/Server`.
    const PATH: &'static str;
    /// Key of the collection array the server wraps payloads in.
    const COLLECTION: &'static str;
    /// The attribute that identifies one instance.
    const PRIMARY_KEY: &'static str;
    /// Every attribute the server may return for this type, in snake_case.
    ///
    /// Payload keys outside this list fail decoding rather than being
    /// silently dropped.
    const FIELDS: &'static [&'static str];

    /// Returns the instance's id, if known.
    fn id(&self) -> Option<u64>;

    /// Creates an unloaded instance carrying only its id.
    fn from_id(id: u64) -> Self;

    /// Decodes one wire-case payload object into the typed struct.
    ///
    /// # Errors
    ///
    /// [`ResourceError::UnknownAttribute`] for any payload key not listed
    /// in [`Self::FIELDS`], or [`ResourceError::Decode`] when a known key
    /// holds an incompatible value.
    fn decode_entity(payload: &Value) -> Result<Self, ResourceError> {
        let attrs = wire::to_attribute_case(payload.clone());

        if let Value::Object(map) = &attrs {
            for key in map.keys() {
                if !Self::FIELDS.contains(&key.as_str()) {
                    return Err(ResourceError::UnknownAttribute {
                        resource: Self::NAME,
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(serde_json::from_value(attrs)?)
    }

    /// Fetches every instance the caller can see.
    ///
    /// # Errors
    ///
    /// [`ResourceError::Api`] on a failure status,
    /// [`ResourceError::UnexpectedBody`] when the collection wrapper is
    /// missing, and decoding errors per [`Self::decode_entity`].
    async fn all(client: &ApiClient) -> Result<Vec<Entity<Self>>, ResourceError> {
        let mut resource = Resource::new(Self::PATH);
        let outcome = resource.get(client).await?;

        let body = match outcome {
            CallOutcome::Payload(body) => body,
            CallOutcome::Completed | CallOutcome::Raw(_) => {
                return Err(ResourceError::UnexpectedBody {
                    expected: "a JSON collection",
                })
            }
        };

        let items = body
            .get(Self::COLLECTION)
            .and_then(Value::as_array)
            .ok_or(ResourceError::UnexpectedBody {
                expected: "a collection array",
            })?;

        items.iter().map(|item| Entity::decoded(item)).collect()
    }

    /// Fetches one instance by id.
    ///
    /// # Errors
    ///
    /// See [`Entity::load`].
    async fn find(client: &ApiClient, id: u64) -> Result<Entity<Self>, ResourceError> {
        let mut entity = Entity::<Self>::from_id(id);
        entity.load(client).await?;
        Ok(entity)
    }
}

/// A typed resource instance together with its API plumbing.
///
/// Dereferences to the typed struct, so attribute access reads naturally:
/// `server.name`. Attributes populate on [`Entity::load`]; an entity built
/// by [`Entity::from_id`] holds only its id until then.
#[derive(Clone, Debug)]
pub struct Entity<T: RestResource> {
    resource: Resource,
    data: T,
}

impl<T: RestResource> Entity<T> {
    /// Wraps an already-populated instance.
    #[must_use]
    pub fn new(data: T) -> Self {
        let path = data
            .id()
            .map_or_else(|| T::PATH.to_string(), |id| format!("{}/{id}", T::PATH));
        Self {
            resource: Resource::new(path),
            data,
        }
    }

    /// Creates an unloaded entity for the given id.
    ///
    /// No network traffic happens until [`Entity::load`].
    #[must_use]
    pub fn from_id(id: u64) -> Self {
        Self {
            resource: Resource::new(format!("{}/{id}", T::PATH)),
            data: T::from_id(id),
        }
    }

    /// Decodes a wire payload into a loaded entity.
    fn decoded(payload: &Value) -> Result<Self, ResourceError> {
        let data = T::decode_entity(payload)?;
        let mut entity = Self::new(data);
        entity.resource.mark_loaded();
        Ok(entity)
    }

    /// Fetches the entity's attributes from the server.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] when the entity has no id,
    /// [`ResourceError::Api`] on a failure status, and
    /// [`ResourceError::UnexpectedBody`] when the collection wrapper is
    /// missing or empty.
    pub async fn load(&mut self, client: &ApiClient) -> Result<(), ResourceError> {
        if self.data.id().is_none() {
            return Err(ResourceError::State {
                message: format!("{} has no {} set", T::NAME, T::PRIMARY_KEY),
            });
        }

        let outcome = self.resource.get(client).await?;
        let body = match outcome {
            CallOutcome::Payload(body) => body,
            CallOutcome::Completed | CallOutcome::Raw(_) => {
                return Err(ResourceError::UnexpectedBody {
                    expected: "a JSON collection",
                })
            }
        };

        let item = body
            .get(T::COLLECTION)
            .and_then(|c| c.get(0))
            .ok_or(ResourceError::UnexpectedBody {
                expected: "a single-item collection",
            })?;

        self.data = T::decode_entity(item)?;
        self.resource.mark_loaded();
        Ok(())
    }

    /// Fetches attributes only if they have not been loaded yet.
    ///
    /// # Errors
    ///
    /// See [`Entity::load`].
    pub async fn load_if_needed(&mut self, client: &ApiClient) -> Result<(), ResourceError> {
        if self.resource.is_loaded() {
            return Ok(());
        }
        self.load(client).await
    }

    /// Returns the underlying [`Resource`].
    #[must_use]
    pub const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Returns the underlying [`Resource`] mutably.
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    /// Consumes the entity, returning the typed data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: RestResource> std::ops::Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T: RestResource> std::ops::DerefMut for Entity<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, Deserialize, Serialize)]
    struct Widget {
        widget_id: Option<u64>,
        name: Option<String>,
        spin_rate: Option<u64>,
        #[serde(rename = "type")]
        kind: Option<String>,
    }

    impl RestResource for Widget {
        const NAME: &'static str = "Widget";
        const PATH: &'static str = "test/Widget";
        const COLLECTION: &'static str = "widgets";
        const PRIMARY_KEY: &'static str = "widget_id";
        const FIELDS: &'static [&'static str] = &["widget_id", "name", "spin_rate", "type"];

        fn id(&self) -> Option<u64> {
            self.widget_id
        }

        fn from_id(id: u64) -> Self {
            Self {
                widget_id: Some(id),
                name: None,
                spin_rate: None,
                kind: None,
            }
        }
    }

    #[test]
    fn test_decode_entity_translates_wire_keys() {
        let widget =
            Widget::decode_entity(&json!({"widgetId": 7, "spinRate": 33})).unwrap();

        assert_eq!(widget.widget_id, Some(7));
        assert_eq!(widget.spin_rate, Some(33));
        assert_eq!(widget.name, None);
    }

    #[test]
    fn test_decode_entity_handles_reserved_word_key() {
        let widget = Widget::decode_entity(&json!({"widgetId": 7, "type": "ROTARY"})).unwrap();
        assert_eq!(widget.kind.as_deref(), Some("ROTARY"));
    }

    #[test]
    fn test_decode_entity_rejects_unknown_keys() {
        let result = Widget::decode_entity(&json!({"widgetId": 7, "surpriseField": true}));

        match result {
            Err(ResourceError::UnknownAttribute { resource, key }) => {
                assert_eq!(resource, "Widget");
                assert_eq!(key, "surprise_field");
            }
            other => panic!("expected UnknownAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_entity_rejects_wrong_value_type() {
        let result = Widget::decode_entity(&json!({"widgetId": "not-a-number"}));
        assert!(matches!(result, Err(ResourceError::Decode(_))));
    }

    #[test]
    fn test_from_id_builds_instance_path() {
        let entity = Entity::<Widget>::from_id(42);
        assert_eq!(entity.resource().path(), "test/Widget/42");
        assert!(!entity.resource().is_loaded());
        assert_eq!(entity.widget_id, Some(42));
    }

    #[test]
    fn test_entity_derefs_to_data() {
        let mut entity = Entity::new(Widget {
            widget_id: Some(1),
            name: Some("gear".to_string()),
            spin_rate: None,
            kind: None,
        });

        assert_eq!(entity.name.as_deref(), Some("gear"));
        entity.spin_rate = Some(12);
        assert_eq!(entity.spin_rate, Some(12));
    }
}
