
mod channel {
    mod mock_test;
}
mod group {
    mod mock_test;
}
mod identity {
    mod mock_test;
}
mod message {
    mod mock_test;
    mod subscription_test;
}
mod user {
    mod mock_test;
}
