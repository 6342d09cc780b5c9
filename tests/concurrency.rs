mod common;

use httpmock::prelude::*;
use petstore_client::clients::{PetClient, UserClient};
use petstore_client::Configuration;

use common::{config_for, generate_pet, generate_user};

const CALLS: usize = 20;

#[test]
fn parallel_clients_keep_their_own_headers_and_bodies() {
    let server = MockServer::start();
    let pet_config = Configuration {
        api_key: "pet-key".to_string(),
        ..config_for(&server)
    };
    let user_config = Configuration {
        api_key: "user-key".to_string(),
        ..config_for(&server)
    };
    let pet = generate_pet();
    let pet_id = pet.id.unwrap();
    let user = generate_user();

    let get_pet = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v2/pet/{}", pet_id))
            .header("api_key", "pet-key");
        then.status(200).json_body(serde_json::to_value(&pet).unwrap());
    });
    let create_user = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/user")
            .header("api_key", "user-key")
            .header("content-type", "application/json")
            .json_body(serde_json::to_value(&user).unwrap());
        then.status(200);
    });

    let pets = PetClient::with_config(&pet_config);
    let users = UserClient::with_config(&user_config);

    std::thread::scope(|scope| {
        let pet_calls = scope.spawn(|| {
            (0..CALLS)
                .map(|_| pets.get_pet_by_id(pet_id).unwrap().status_code)
                .collect::<Vec<_>>()
        });
        let user_calls = scope.spawn(|| {
            (0..CALLS)
                .map(|_| users.create_user(&user).unwrap().status_code)
                .collect::<Vec<_>>()
        });
        assert!(pet_calls.join().unwrap().iter().all(|status| *status == 200));
        assert!(user_calls.join().unwrap().iter().all(|status| *status == 200));
    });

    assert_eq!(get_pet.hits(), CALLS);
    assert_eq!(create_user.hits(), CALLS);
}
