use crate::ids::{MapObjectId, ObjectTypeKey};

/// Appearance and type of a placeable map object, as read from a map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectTemplate {
    /// Animation file drawn on the adventure map
    pub animation_file: String,
    /// Animation file shown in the map editor palette
    pub editor_animation_file: String,
    pub id: MapObjectId,
    pub subid: i32,
}

impl ObjectTemplate {
    pub fn new(animation_file: impl Into<String>, id: impl Into<MapObjectId>, subid: i32) -> Self {
        Self {
            animation_file: animation_file.into(),
            editor_animation_file: String::new(),
            id: id.into(),
            subid,
        }
    }

    pub fn with_editor_animation(mut self, file: impl Into<String>) -> Self {
        self.editor_animation_file = file.into();
        self
    }

    pub fn type_key(&self) -> ObjectTypeKey {
        ObjectTypeKey {
            primary: self.id,
            secondary: self.subid,
        }
    }

    pub fn with_type_key(mut self, key: ObjectTypeKey) -> Self {
        self.id = key.primary;
        self.subid = key.secondary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_key() {
        let template = ObjectTemplate::new("AVGPIKE0.def", 17, 0);
        assert_eq!(template.type_key(), ObjectTypeKey::new(17, 0));

        let moved = template.clone().with_type_key(ObjectTypeKey::new(54, 3));
        assert_eq!(moved.id, MapObjectId(54));
        assert_eq!(moved.subid, 3);
        assert_eq!(moved.animation_file, template.animation_file);
    }
}
