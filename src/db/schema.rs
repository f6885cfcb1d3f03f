table! {
    clients (client_id) {
        client_id -> Text,
        name -> Text,
        secret_hash -> Nullable<Text>,
    }
}

table! {
    sessions (id) {
        id -> Text,
        client_id -> Text,
        response_type -> Nullable<Text>,
        redirect_uri -> Nullable<Text>,
        state -> Nullable<Text>,
        invalid_after -> Int8,
    }
}

table! {
    uris (client_id, uri) {
        client_id -> Text,
        uri -> Text,
    }
}

joinable!(sessions -> clients (client_id));
joinable!(uris -> clients (client_id));

allow_tables_to_appear_in_same_query!(
    clients,
    sessions,
    uris,
);
