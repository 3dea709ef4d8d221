pub mod error;

pub mod channel {
    pub mod repositories {
        pub mod entities;
        pub mod mongo;
    }
}

pub mod group {
    pub mod repositories {
        pub mod entities;
        pub mod mongo;
    }
}

pub mod identity {
    pub mod repositories {
        pub mod entities;
        pub mod reqwest;
    }
}

pub mod message {
    pub mod repositories {
        pub mod entities;
        pub mod mongo;
    }
}

pub mod storage {
    pub mod repositories {
        pub mod entities;
        pub mod reqwest;
    }
}

pub mod user {
    pub mod repositories {
        pub mod entities;
        pub mod mongo;
    }
}
