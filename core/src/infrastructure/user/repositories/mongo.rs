use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::{ReplaceOptions, ReturnDocument},
};

use crate::{
    domain::{
        common::CoreError,
        group::entities::GroupId,
        user::{
            entities::{UpdateUserInput, User, UserId},
            ports::UserRepository,
        },
    },
    infrastructure::user::repositories::entities::UserDocument,
};

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<UserDocument>("users"),
        }
    }

    async fn update_one(&self, id: &UserId, update: Document) -> Result<User, CoreError> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_str() }, update)
            .return_document(ReturnDocument::After)
            .await?;

        updated
            .map(User::from)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })
    }
}

fn set_fields(input: UpdateUserInput) -> Document {
    let mut fields = Document::new();
    if let Some(username) = input.username {
        fields.insert("username", username);
    }
    if let Some(profile_image_url) = input.profile_image_url {
        fields.insert("profile_image_url", profile_image_url);
    }
    if let Some(status) = input.status {
        fields.insert("status", status);
    }
    if let Some(age) = input.age {
        fields.insert("age", i64::from(age));
    }
    if let Some(personality) = input.personality {
        fields.insert("personality", personality);
    }
    fields
}

impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: User) -> Result<User, CoreError> {
        let document = UserDocument::from(user.clone());
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": user.id.as_str() }, &document)
            .with_options(options)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CoreError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.as_str() })
            .await?;
        Ok(document.map(User::from))
    }

    async fn update(&self, id: &UserId, input: UpdateUserInput) -> Result<User, CoreError> {
        let fields = set_fields(input);
        if fields.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| CoreError::UserNotFound { id: id.clone() });
        }

        self.update_one(id, doc! { "$set": fields }).await
    }

    async fn add_group(&self, id: &UserId, group_id: &GroupId) -> Result<User, CoreError> {
        self.update_one(id, doc! { "$addToSet": { "groups": group_id.as_str() } })
            .await
    }
}
