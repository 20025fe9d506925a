pub mod types;

pub use types::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, Mutation, SetReply, SetRequest,
};
